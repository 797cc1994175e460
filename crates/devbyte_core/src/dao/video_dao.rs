//! Video DAO contract and SQLite implementation.
//!
//! # Invariants
//! - `insert_all` replaces rows sharing a `url` and is atomic per call.
//! - `get_videos` returns rows in storage order (`rowid ASC`).

use crate::db::DbError;
use crate::model::database::DatabaseVideo;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const VIDEO_SELECT_SQL: &str = "SELECT
    url,
    updated,
    title,
    description,
    thumbnail
FROM videos";

pub type DaoResult<T> = Result<T, DaoError>;

#[derive(Debug)]
pub enum DaoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid video data: {message}"),
        }
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for DaoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for DaoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for cached playlist videos.
pub trait VideoDao {
    fn insert_all(&self, videos: &[DatabaseVideo]) -> DaoResult<usize>;
    fn get_videos(&self) -> DaoResult<Vec<DatabaseVideo>>;
    fn count(&self) -> DaoResult<u64>;
}

/// SQLite-backed video DAO borrowing an open connection.
pub struct SqliteVideoDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVideoDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VideoDao for SqliteVideoDao<'_> {
    /// Inserts or replaces every row in one transaction.
    ///
    /// Returns the number of rows written. Empty input touches nothing.
    fn insert_all(&self, videos: &[DatabaseVideo]) -> DaoResult<usize> {
        if videos.is_empty() {
            return Ok(0);
        }
        for video in videos {
            validate_row(video)?;
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO videos (
                    url,
                    updated,
                    title,
                    description,
                    thumbnail
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for video in videos {
                stmt.execute(params![
                    video.url.as_str(),
                    video.updated.as_str(),
                    video.title.as_str(),
                    video.description.as_str(),
                    video.thumbnail.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        Ok(videos.len())
    }

    fn get_videos(&self) -> DaoResult<Vec<DatabaseVideo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VIDEO_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut videos = Vec::new();

        while let Some(row) = rows.next()? {
            videos.push(parse_video_row(row)?);
        }

        Ok(videos)
    }

    fn count(&self) -> DaoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM videos;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| DaoError::InvalidData(format!("negative video count `{count}`")))
    }
}

fn parse_video_row(row: &Row<'_>) -> DaoResult<DatabaseVideo> {
    let video = DatabaseVideo {
        url: row.get("url")?,
        updated: row.get("updated")?,
        title: row.get("title")?,
        description: row.get("description")?,
        thumbnail: row.get("thumbnail")?,
    };
    validate_row(&video)?;
    Ok(video)
}

fn validate_row(video: &DatabaseVideo) -> DaoResult<()> {
    if video.url.trim().is_empty() {
        return Err(DaoError::InvalidData(format!(
            "empty url for video titled `{}`",
            video.title
        )));
    }
    Ok(())
}
