//! Core data layer for the DevByte video viewer.
//!
//! Fetches the DevByte playlist, caches it in an on-device SQLite store and
//! exposes the cached videos as an observable list.

pub mod config;
pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod network;
pub mod repository;

pub use config::{ConfigError, CoreConfig};
pub use dao::video_dao::{DaoError, DaoResult, SqliteVideoDao, VideoDao};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::database::DatabaseVideo;
pub use model::network::{NetworkVideo, NetworkVideoContainer};
pub use model::video::{smart_truncate, DevByteVideo};
pub use network::{HttpPlaylistSource, NetError, NetResult, PlaylistSource};
pub use repository::videos_repository::{
    ObserveError, RefreshError, RefreshResult, VideoList, VideosRepository,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builds the HTTP playlist source described by `config`.
pub fn playlist_source_from_config(config: &CoreConfig) -> NetResult<HttpPlaylistSource> {
    HttpPlaylistSource::new(
        &config.playlist_base_url,
        config.fetch_timeout(),
        &config.user_agent,
    )
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping, playlist_source_from_config, CoreConfig};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn playlist_source_uses_configured_base_url() {
        let config = CoreConfig {
            playlist_base_url: "http://localhost:9000/".to_string(),
            ..CoreConfig::default()
        };
        let source = playlist_source_from_config(&config).expect("client should build");
        assert_eq!(source.playlist_url(), "http://localhost:9000/devbytes.json");
    }
}
