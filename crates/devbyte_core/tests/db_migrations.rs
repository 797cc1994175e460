use devbyte_core::db::migrations::{apply_migrations, latest_version, schema_version};
use devbyte_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn videos_table_is_keyed_by_url() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());

    let columns = table_columns(&conn, "videos");
    let names: Vec<&str> = columns.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["url", "updated", "title", "description", "thumbnail"]
    );
    for (name, not_null, pk) in &columns {
        assert!(*not_null, "column {name} must be NOT NULL");
        assert_eq!(*pk, name == "url", "only url is the primary key, got {name}");
    }
}

#[test]
fn duplicate_url_is_rejected_by_schema() {
    let conn = open_db_in_memory().unwrap();
    let insert = "INSERT INTO videos (url, updated, title, description, thumbnail)
                  VALUES ('https://v/1', '2019', 'one', 'first', 'https://t/1');";

    conn.execute(insert, []).unwrap();
    assert!(conn.execute(insert, []).is_err());
}

#[test]
fn migrating_up_to_date_store_is_noop() {
    let mut conn = open_db_in_memory().unwrap();

    let upgrade = apply_migrations(&mut conn).unwrap();
    assert!(upgrade.is_noop());
    assert_eq!(upgrade.to, latest_version());
}

#[test]
fn open_db_creates_missing_directories_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_data").join("cache").join("videos.db");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO videos (url, updated, title, description, thumbnail)
         VALUES ('https://v/1', '2019', 'one', 'first', 'https://t/1');",
        [],
    )
    .unwrap();
    drop(conn);

    let reopened = open_db(&path).unwrap();
    assert_eq!(schema_version(&reopened).unwrap(), latest_version());
    let count: i64 = reopened
        .query_row("SELECT COUNT(*) FROM videos;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn store_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_path_under_a_file_reports_directory_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();

    let err = open_db(blocker.join("videos.db")).unwrap_err();
    assert!(matches!(err, DbError::StoreDir { .. }), "unexpected error: {err}");
}

/// `(name, not_null, is_primary_key)` for every column, in declaration order.
fn table_columns(conn: &Connection, table: &str) -> Vec<(String, bool, bool)> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>("name")?,
            row.get::<_, i64>("notnull")? == 1,
            row.get::<_, i64>("pk")? > 0,
        ))
    })
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
}
