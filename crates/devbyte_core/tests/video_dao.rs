use devbyte_core::db::open_db_in_memory;
use devbyte_core::{DaoError, DatabaseVideo, SqliteVideoDao, VideoDao};

fn row(id: u32, title: &str) -> DatabaseVideo {
    DatabaseVideo {
        url: format!("https://www.youtube.com/watch?v={id}"),
        updated: "2018-06-07T17:09:43+00:00".to_string(),
        title: title.to_string(),
        description: format!("description for {title}"),
        thumbnail: format!("https://i4.ytimg.com/vi/{id}/hqdefault.jpg"),
    }
}

#[test]
fn insert_all_then_get_videos_preserves_order() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteVideoDao::new(&conn);

    let written = dao
        .insert_all(&[row(1, "one"), row(2, "two"), row(3, "three")])
        .unwrap();
    assert_eq!(written, 3);

    let stored = dao.get_videos().unwrap();
    let titles: Vec<&str> = stored.iter().map(|video| video.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
    assert_eq!(stored[0], row(1, "one"));
}

#[test]
fn insert_all_replaces_rows_with_same_url() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteVideoDao::new(&conn);

    dao.insert_all(&[row(1, "old title"), row(2, "two")]).unwrap();
    dao.insert_all(&[row(1, "new title")]).unwrap();

    assert_eq!(dao.count().unwrap(), 2);
    let stored = dao.get_videos().unwrap();
    assert!(stored.iter().any(|video| video.title == "new title"));
    assert!(!stored.iter().any(|video| video.title == "old title"));
}

#[test]
fn insert_all_with_empty_slice_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteVideoDao::new(&conn);

    assert_eq!(dao.insert_all(&[]).unwrap(), 0);
    assert_eq!(dao.count().unwrap(), 0);
    assert!(dao.get_videos().unwrap().is_empty());
}

#[test]
fn insert_all_rejects_empty_url_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteVideoDao::new(&conn);

    let mut bad = row(2, "bad");
    bad.url = "  ".to_string();
    let err = dao.insert_all(&[row(1, "good"), bad]).unwrap_err();

    assert!(matches!(err, DaoError::InvalidData(_)));
    assert_eq!(dao.count().unwrap(), 0);
}

#[test]
fn get_videos_reports_invalid_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO videos (url, updated, title, description, thumbnail)
         VALUES ('', '2019', 'broken', 'd', 't');",
        [],
    )
    .unwrap();

    let err = SqliteVideoDao::new(&conn).get_videos().unwrap_err();
    assert!(matches!(err, DaoError::InvalidData(message) if message.contains("broken")));
}
