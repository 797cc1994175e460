//! Data access objects over the video store.
//!
//! # Responsibility
//! - Keep SQL for the `videos` table inside one boundary.
//! - Report persisted-state problems instead of masking them.

pub mod video_dao;
