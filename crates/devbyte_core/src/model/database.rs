//! Row model for the `videos` table.

use crate::model::video::DevByteVideo;

/// One persisted video row. `url` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseVideo {
    pub url: String,
    pub updated: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

impl DatabaseVideo {
    pub fn as_domain_model(&self) -> DevByteVideo {
        DevByteVideo {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            updated: self.updated.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }
}

/// Maps stored rows to domain objects, preserving row order.
pub fn as_domain_model(rows: &[DatabaseVideo]) -> Vec<DevByteVideo> {
    rows.iter().map(DatabaseVideo::as_domain_model).collect()
}
