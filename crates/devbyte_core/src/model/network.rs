//! Wire models for the remote playlist endpoint.
//!
//! The endpoint answers with a single JSON object:
//!
//! ```json
//! { "videos": [ { "title": "...", "description": "...", "url": "...",
//!                 "updated": "...", "thumbnail": "...", "closedCaptions": null } ] }
//! ```

use crate::model::database::DatabaseVideo;
use serde::Deserialize;

/// Top-level playlist response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NetworkVideoContainer {
    pub videos: Vec<NetworkVideo>,
}

/// One playlist entry as published by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVideo {
    pub title: String,
    pub description: String,
    pub url: String,
    pub updated: String,
    pub thumbnail: String,
    /// Not persisted; the store has no column for it.
    #[serde(default)]
    pub closed_captions: Option<String>,
}

impl NetworkVideoContainer {
    /// Maps the fetched playlist to rows for the video store.
    pub fn as_database_model(&self) -> Vec<DatabaseVideo> {
        self.videos
            .iter()
            .map(|video| DatabaseVideo {
                url: video.url.clone(),
                updated: video.updated.clone(),
                title: video.title.clone(),
                description: video.description.clone(),
                thumbnail: video.thumbnail.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
