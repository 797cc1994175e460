//! DevByte playlist HTTP client.

use crate::model::network::NetworkVideoContainer;
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Base URL of the public DevByte playlist service.
pub const DEFAULT_BASE_URL: &str = "https://devbytes.udacity.com/";
pub const PLAYLIST_PATH: &str = "devbytes.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_USER_AGENT: &str = concat!("devbyte-core/", env!("CARGO_PKG_VERSION"));

pub type NetResult<T> = Result<T, NetError>;

#[derive(Debug)]
pub enum NetError {
    /// Connection, TLS, timeout or body read failure.
    Network(reqwest::Error),
    /// Non-2xx status.
    Http(u16),
    /// Body was not a playlist document.
    Parse(serde_json::Error),
    /// HTTP client could not be constructed.
    Client(reqwest::Error),
}

impl Display for NetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Http(status) => write!(f, "playlist endpoint returned HTTP {status}"),
            Self::Parse(err) => write!(f, "malformed playlist response: {err}"),
            Self::Client(err) => write!(f, "failed to build http client: {err}"),
        }
    }
}

impl Error for NetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(err) | Self::Client(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Http(_) => None,
        }
    }
}

/// Anything that can produce the current playlist.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn get_playlist(&self) -> NetResult<NetworkVideoContainer>;
}

/// Fetches the playlist from `{base_url}/devbytes.json`.
pub struct HttpPlaylistSource {
    http: Client,
    playlist_url: String,
}

impl HttpPlaylistSource {
    /// Builds a client for `base_url` with the given timeout and user agent.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> NetResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(NetError::Client)?;

        Ok(Self {
            http,
            playlist_url: playlist_url(base_url),
        })
    }

    /// Client for the public endpoint with default timeout and user agent.
    pub fn with_defaults() -> NetResult<Self> {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
            DEFAULT_USER_AGENT,
        )
    }

    pub fn playlist_url(&self) -> &str {
        &self.playlist_url
    }
}

#[async_trait]
impl PlaylistSource for HttpPlaylistSource {
    async fn get_playlist(&self) -> NetResult<NetworkVideoContainer> {
        let started_at = Instant::now();
        debug!(
            "event=playlist_fetch module=network status=start url={}",
            self.playlist_url
        );

        let response = self
            .http
            .get(&self.playlist_url)
            .send()
            .await
            .map_err(|err| log_failure(started_at, NetError::Network(err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(log_failure(started_at, NetError::Http(status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| log_failure(started_at, NetError::Network(err)))?;
        let container: NetworkVideoContainer = serde_json::from_slice(&body)
            .map_err(|err| log_failure(started_at, NetError::Parse(err)))?;

        info!(
            "event=playlist_fetch module=network status=ok video_count={} bytes={} duration_ms={}",
            container.len(),
            body.len(),
            started_at.elapsed().as_millis()
        );
        Ok(container)
    }
}

fn playlist_url(base_url: &str) -> String {
    format!("{}/{PLAYLIST_PATH}", base_url.trim().trim_end_matches('/'))
}

fn log_failure(started_at: Instant, err: NetError) -> NetError {
    error!(
        "event=playlist_fetch module=network status=error duration_ms={} error={err}",
        started_at.elapsed().as_millis()
    );
    err
}
