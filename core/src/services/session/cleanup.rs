//! Background cleanup of revoked and expired refresh tokens
//!
//! A single recurring task, started at process boot and stopped at
//! shutdown, deletes records the request path no longer needs. Tick
//! failures are logged and swallowed; they never terminate the scheduler
//! or the process.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::errors::SessionResult;
use crate::repositories::SessionStore;

/// Configuration for the session cleanup task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Grace period before dead records are deleted (in days)
    pub grace_period_days: i64,
    /// Whether to run cleanup at all
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            grace_period_days: 7,   // Keep dead tokens for 7 days
            enabled: true,
        }
    }
}

impl From<&sl_shared::config::SessionConfig> for CleanupConfig {
    fn from(config: &sl_shared::config::SessionConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            grace_period_days: config.cleanup_grace_days,
            enabled: config.cleanup_enabled,
        }
    }
}

struct CleanupWorker {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Recurring task purging inactive refresh token records
///
/// Owns its background task handle: `start` is idempotent and `stop`
/// guarantees no further ticks fire, waiting a bounded drain window for an
/// in-flight tick before abandoning it.
pub struct SessionCleanup<S: SessionStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: CleanupConfig,
    worker: Mutex<Option<CleanupWorker>>,
}

impl<S: SessionStore> SessionCleanup<S> {
    /// Creates a new cleanup task (not yet started)
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: CleanupConfig) -> Self {
        Self {
            store,
            clock,
            config,
            worker: Mutex::new(None),
        }
    }

    /// Runs a single cleanup tick
    ///
    /// Deletes every record that has been revoked or expired for longer
    /// than the retention grace period, in one bulk store operation.
    /// Active records are untouched.
    pub async fn run_cleanup(&self) -> SessionResult<u64> {
        purge(&*self.store, &*self.clock, &self.config).await
    }

    /// Starts the background task
    ///
    /// Idempotent: a second call while the task is running does not spawn
    /// a second timer. The task acquires a store connection only for the
    /// duration of each tick, never across its sleep interval.
    pub async fn start(&self) {
        if !self.config.enabled {
            warn!("session cleanup is disabled");
            return;
        }

        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            warn!("session cleanup already running");
            return;
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let store = Arc::clone(&self.store);
        let clock = Arc::clone(&self.clock);
        let config = self.config.clone();
        let interval = StdDuration::from_secs(config.interval_seconds);

        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = config.interval_seconds,
                grace_period_days = config.grace_period_days,
                "session cleanup started"
            );

            let mut ticker = tokio::time::interval(interval);

            loop {
                // Shutdown wins over a due tick: once stop is signaled no
                // further purge may start, even when both arms are ready.
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => {
                        info!("session cleanup stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = purge(&*store, &*clock, &config).await {
                            error!(error = %e, "session cleanup tick failed");
                        }
                    }
                }
            }
        });

        *worker = Some(CleanupWorker {
            stop: stop_tx,
            handle,
        });
    }

    /// Stops the background task
    ///
    /// No tick starts after this returns. An in-flight tick is given up to
    /// `drain` to finish, then the task is aborted; this method never
    /// blocks unboundedly.
    pub async fn stop(&self, drain: StdDuration) {
        let Some(CleanupWorker { stop, mut handle }) = self.worker.lock().await.take() else {
            return;
        };

        let _ = stop.send(true);

        if tokio::time::timeout(drain, &mut handle).await.is_err() {
            warn!("session cleanup did not stop within drain window, aborting");
            handle.abort();
        }
    }

    /// Whether the background task is currently running
    pub async fn is_running(&self) -> bool {
        self.worker.lock().await.is_some()
    }
}

/// One bulk deletion pass over the store
///
/// The cutoff trails `now` by the grace period, so a record survives at
/// least that long after the moment it was revoked or expired.
async fn purge<S: SessionStore>(
    store: &S,
    clock: &dyn Clock,
    config: &CleanupConfig,
) -> SessionResult<u64> {
    let cutoff = clock.now() - Duration::days(config.grace_period_days);

    let deleted = store.delete_inactive(cutoff).await?;
    if deleted > 0 {
        info!(deleted, "purged inactive refresh tokens");
    }

    Ok(deleted)
}
