//! Repository layer joining the playlist source and the video store.
//!
//! # Responsibility
//! - Refresh the on-device cache from the network.
//! - Publish stored videos to presentation-layer observers.
//!
//! # Invariants
//! - Stored rows mirror the last successful fetch.
//! - A failed refresh changes neither the store nor what observers see.

pub mod videos_repository;
