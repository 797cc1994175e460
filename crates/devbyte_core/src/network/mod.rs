//! Remote playlist access.
//!
//! # Responsibility
//! - Define the `PlaylistSource` seam the repository fetches through.
//! - Provide the HTTP implementation against the DevByte endpoint.

pub mod client;

pub use client::{HttpPlaylistSource, NetError, NetResult, PlaylistSource};
