//! Embedded schema steps for the video store.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Ordered schema steps; index `i` upgrades the store to version `i + 1`.
const SCHEMA_STEPS: &[&str] = &[include_str!("0001_videos.sql")];

/// Versions before and after a call to [`apply_migrations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from: u32,
    pub to: u32,
}

impl SchemaUpgrade {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Latest schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Version currently recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Runs every pending schema step inside one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let from = schema_version(conn)?;
    let to = latest_version();

    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let upgrade = SchemaUpgrade { from, to };
    if upgrade.is_noop() {
        return Ok(upgrade);
    }

    let tx = conn.transaction()?;
    for (index, step) in SCHEMA_STEPS.iter().enumerate().skip(from as usize) {
        tx.execute_batch(step)?;
        tx.pragma_update(None, "user_version", index as u32 + 1)?;
    }
    tx.commit()?;

    Ok(upgrade)
}
