//! Route config source backed by a TOML file and a `notify` watcher.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::{RwLock, mpsc};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use super::{ConfigChange, ConfigSource, LoadError, load_snapshot};
use crate::routes::ConfigSnapshot;
use crate::watcher::{Debouncer, WatchError};

/// Watches the route config file and reports debounced reloads.
///
/// The parent directory is watched rather than the file itself so that
/// editors which save by writing a temp file and renaming it are still seen.
pub struct FileConfigSource {
    config_path: PathBuf,
    mode: String,
    debounce_ms: u64,
    /// Last successfully loaded snapshot, for change classification.
    last: Arc<RwLock<Option<Arc<ConfigSnapshot>>>>,
    cancel: CancellationToken,
}

impl FileConfigSource {
    pub fn new(config_path: impl Into<PathBuf>, mode: impl Into<String>, debounce_ms: u64) -> Self {
        Self {
            config_path: config_path.into(),
            mode: mode.into(),
            debounce_ms,
            last: Arc::new(RwLock::new(None)),
            cancel: CancellationToken::new(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reload now and classify the result against the last good snapshot.
    pub async fn reload(&self) -> ConfigChange {
        reload(&self.config_path, &self.mode, &self.last).await
    }
}

async fn reload(
    path: &Path,
    mode: &str,
    last: &RwLock<Option<Arc<ConfigSnapshot>>>,
) -> ConfigChange {
    match load_snapshot(path, mode) {
        Ok(next) => {
            let next = Arc::new(next);
            let mut last = last.write().await;
            let change = match last.as_deref() {
                Some(prev) => ConfigChange::between(prev, Arc::clone(&next)),
                None => ConfigChange::initial(Arc::clone(&next)),
            };
            *last = Some(next);
            crate::debug_event!(
                "config",
                "reloaded",
                "config_changed={} route_config_changed={}",
                change.config_changed,
                change.route_config_changed
            );
            change
        }
        Err(e) => {
            tracing::warn!("[config] reload failed: {e}");
            ConfigChange::failed(e.to_string())
        }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn get_config(&self) -> Result<Arc<ConfigSnapshot>, LoadError> {
        let snapshot = Arc::new(load_snapshot(&self.config_path, &self.mode)?);
        *self.last.write().await = Some(Arc::clone(&snapshot));
        crate::log_event!(
            "config",
            "loaded",
            "{} routes from {}",
            snapshot.routes.len(),
            self.config_path.display()
        );
        Ok(snapshot)
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<ConfigChange>, WatchError> {
        let file_name: OsString = self
            .config_path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| WatchError::InitFailed {
                reason: format!("not a file path: {}", self.config_path.display()),
            })?;
        let watch_dir = match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (event_tx, mut event_rx) = mpsc::channel(100);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = event_tx.blocking_send(res);
        })?;
        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: watch_dir.clone(),
                reason: e.to_string(),
            })?;

        crate::log_event!("config", "watching", "{}", self.config_path.display());

        let (change_tx, change_rx) = mpsc::channel(16);
        let config_path = self.config_path.clone();
        let mode = self.mode.clone();
        let last = Arc::clone(&self.last);
        let cancel = self.cancel.clone();
        let mut debouncer = Debouncer::new(self.debounce_ms);

        tokio::spawn(async move {
            // Dropping the watcher stops event delivery.
            let _watcher = watcher;
            let mut ticker = interval(debouncer.poll_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,

                    Some(res) = event_rx.recv() => match res {
                        Ok(event) => {
                            let touches_config = event
                                .paths
                                .iter()
                                .any(|p| p.file_name() == Some(file_name.as_os_str()));
                            let relevant = matches!(
                                event.kind,
                                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                            );
                            if touches_config && relevant {
                                debouncer.record();
                            }
                        }
                        Err(e) => {
                            tracing::error!("[config] file watch error: {e}");
                        }
                    },

                    _ = ticker.tick() => {
                        if debouncer.take_ready() {
                            let change = reload(&config_path, &mode, &last).await;
                            if change_tx.send(change).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }

            crate::debug_event!("config", "stopped watching", "{}", config_path.display());
        });

        Ok(change_rx)
    }

    async fn close(&self) {
        self.cancel.cancel();
    }
}
