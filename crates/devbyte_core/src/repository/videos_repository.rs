//! Videos repository: network fetch, disk write-through, observable reads.

use crate::dao::video_dao::{DaoError, DaoResult, SqliteVideoDao, VideoDao};
use crate::model::database::{as_domain_model, DatabaseVideo};
use crate::model::video::DevByteVideo;
use crate::network::client::{NetError, PlaylistSource};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio::time::MissedTickBehavior;

/// Lower bound for [`VideosRepository::refresh_loop`] periods.
pub const MIN_REFRESH_PERIOD: Duration = Duration::from_secs(1);

pub type RefreshResult<T> = Result<T, RefreshError>;

#[derive(Debug)]
pub enum RefreshError {
    /// Fetching the playlist failed; the store was not touched.
    Network(NetError),
    /// Writing or re-reading the store failed; the write was rolled back.
    Dao(DaoError),
    /// A previous store operation panicked while holding the connection.
    StoreUnavailable,
    /// The blocking worker running the store write was cancelled or panicked.
    Worker(JoinError),
}

impl Display for RefreshError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "{err}"),
            Self::Dao(err) => write!(f, "{err}"),
            Self::StoreUnavailable => write!(f, "video store connection is poisoned"),
            Self::Worker(err) => write!(f, "video store worker failed: {err}"),
        }
    }
}

impl Error for RefreshError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Dao(err) => Some(err),
            Self::StoreUnavailable => None,
            Self::Worker(err) => Some(err),
        }
    }
}

impl From<NetError> for RefreshError {
    fn from(value: NetError) -> Self {
        Self::Network(value)
    }
}

impl From<DaoError> for RefreshError {
    fn from(value: DaoError) -> Self {
        Self::Dao(value)
    }
}

/// Observer side of the stored video list was disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveError {
    Closed,
}

impl Display for ObserveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "videos repository was dropped"),
        }
    }
}

impl Error for ObserveError {}

/// Fetches DevByte videos from the network and caches them on disk.
///
/// Observers obtained from [`videos`](Self::videos) see the stored rows,
/// never the raw network response.
pub struct VideosRepository<S: PlaylistSource> {
    conn: Arc<Mutex<Connection>>,
    source: S,
    stored: Arc<watch::Sender<Vec<DatabaseVideo>>>,
}

impl<S: PlaylistSource> VideosRepository<S> {
    /// Wraps an open video store and a playlist source.
    ///
    /// Reads the rows already on disk so observers start from the offline cache.
    pub fn new(conn: Connection, source: S) -> DaoResult<Self> {
        let stored = SqliteVideoDao::new(&conn).get_videos()?;
        debug!(
            "event=videos_load module=repository status=ok video_count={}",
            stored.len()
        );
        let (stored, _) = watch::channel(stored);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            source,
            stored: Arc::new(stored),
        })
    }

    /// Fetches the playlist and writes it through to the video store.
    ///
    /// The store write runs on tokio's blocking pool. Returns the number of
    /// videos written. Observers are notified only when rows were written.
    pub async fn refresh_videos(&self) -> RefreshResult<usize> {
        let started_at = Instant::now();
        info!("event=videos_refresh module=repository status=start");

        match self.fetch_and_store().await {
            Ok(written) => {
                info!(
                    "event=videos_refresh module=repository status=ok written={written} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(written)
            }
            Err(err) => {
                error!(
                    "event=videos_refresh module=repository status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Observable list of stored videos in domain form.
    pub fn videos(&self) -> VideoList {
        VideoList {
            stored: self.stored.subscribe(),
        }
    }

    /// Refreshes every `period` until the future is dropped.
    ///
    /// The first refresh runs immediately. Failures are logged and the loop
    /// keeps going. Periods below [`MIN_REFRESH_PERIOD`] are raised to it.
    pub async fn refresh_loop(&self, period: Duration) {
        let mut ticker = tokio::time::interval(period.max(MIN_REFRESH_PERIOD));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(err) = self.refresh_videos().await {
                warn!("event=videos_refresh_loop module=repository status=retry_next_tick error={err}");
            }
        }
    }

    async fn fetch_and_store(&self) -> RefreshResult<usize> {
        let playlist = self.source.get_playlist().await?;
        if playlist.is_empty() {
            debug!("event=videos_refresh module=repository status=empty_playlist");
        }
        let rows = playlist.as_database_model();
        let conn = Arc::clone(&self.conn);
        let stored = Arc::clone(&self.stored);

        // Publish under the connection lock so overlapping refreshes cannot
        // hand observers an older snapshot than the table holds.
        tokio::task::spawn_blocking(move || -> RefreshResult<usize> {
            let conn = conn.lock().map_err(|_| RefreshError::StoreUnavailable)?;
            let dao = SqliteVideoDao::new(&conn);
            let written = dao.insert_all(&rows)?;
            if written > 0 {
                stored.send_replace(dao.get_videos()?);
            }
            Ok(written)
        })
        .await
        .map_err(RefreshError::Worker)?
    }
}

/// Read-only view over the stored videos.
///
/// Rows are mapped to [`DevByteVideo`] on read, so an unobserved list costs
/// nothing beyond holding the latest rows.
#[derive(Debug, Clone)]
pub struct VideoList {
    stored: watch::Receiver<Vec<DatabaseVideo>>,
}

impl VideoList {
    /// Latest stored videos.
    pub fn current(&self) -> Vec<DevByteVideo> {
        as_domain_model(&self.stored.borrow())
    }

    /// Whether a refresh has published rows this observer has not consumed.
    pub fn has_pending_change(&self) -> bool {
        self.stored.has_changed().unwrap_or(false)
    }

    /// Waits for the next successful refresh and returns the new list.
    ///
    /// # Errors
    /// - `ObserveError::Closed` once the repository has been dropped.
    pub async fn changed(&mut self) -> Result<Vec<DevByteVideo>, ObserveError> {
        self.stored
            .changed()
            .await
            .map_err(|_| ObserveError::Closed)?;
        Ok(as_domain_model(&self.stored.borrow_and_update()))
    }
}
