//! Video representations used on each side of the data layer.
//!
//! # Responsibility
//! - `network`: wire shape of the remote playlist.
//! - `database`: row shape persisted in the video store.
//! - `video`: domain shape handed to the presentation layer.
//!
//! # Invariants
//! - A video is identified by its `url` in every representation.
//! - Mappings preserve playlist order.

pub mod database;
pub mod network;
pub mod video;
