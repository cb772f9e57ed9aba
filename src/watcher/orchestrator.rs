//! Watch orchestrator: keeps the output directory in sync with the route
//! config.
//!
//! ```text
//! start:   get_config -> subscribe -> write_all          (any failure is fatal)
//! change:  Err                       -> report, keep snapshot and output
//!          Ok, nothing relevant      -> adopt snapshot, no file I/O
//!                                       (unless the last pass failed)
//!          Ok, config/routes changed -> adopt snapshot, write_all
//! close:   stop consuming changes; a pass in flight runs to completion
//! ```
//!
//! Passes never overlap. Changes that queue up while a pass runs are folded
//! into one pending reload (latest snapshot wins, change flags are OR-ed),
//! so a burst of edits costs at most one extra pass.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::WatchError;
use super::sink::{LogOptions, LogSink};
use crate::loader::{ConfigChange, ConfigSource};
use crate::routes::ConfigSnapshot;
use crate::typegen::{OutputTarget, TypegenContext, WriteStats, write_all};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Generating,
    Closed,
}

impl WatchState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WatchState::Idle,
            1 => WatchState::Generating,
            _ => WatchState::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            WatchState::Idle => 0,
            WatchState::Generating => 1,
            WatchState::Closed => 2,
        }
    }
}

/// Counters shared between the orchestrator task and its handle.
#[derive(Debug, Default)]
pub struct WatchStats {
    events: AtomicUsize,
    passes: AtomicUsize,
    failures: AtomicUsize,
    state: AtomicU8,
}

impl WatchStats {
    /// Change notifications consumed.
    pub fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }

    /// Completed write passes, including the startup pass.
    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::SeqCst)
    }

    /// Failed reloads plus failed write passes.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> WatchState {
        WatchState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn set_state(&self, state: WatchState) {
        self.state.store(state.as_u8(), Ordering::SeqCst);
    }
}

/// A reload waiting for the next pass.
struct PendingReload {
    snapshot: Arc<ConfigSnapshot>,
    config_changed: bool,
    route_config_changed: bool,
}

pub struct Orchestrator<S> {
    source: S,
    context: TypegenContext,
    events: mpsc::Receiver<ConfigChange>,
    sink: Arc<dyn LogSink>,
    stats: Arc<WatchStats>,
    cancel: CancellationToken,
    /// Cancelled once the run loop has exited.
    stopped: CancellationToken,
    /// The last write pass failed, so the output on disk is stale.
    dirty: bool,
}

impl<S: ConfigSource + 'static> Orchestrator<S> {
    /// Load the baseline, write it, and start reacting to changes.
    ///
    /// Fails without spawning anything if the initial config cannot be
    /// loaded, the source cannot be subscribed to, or the first pass fails.
    pub async fn start(
        source: S,
        target: OutputTarget,
        sink: Arc<dyn LogSink>,
    ) -> Result<WatchHandle, WatchError> {
        let snapshot = source
            .get_config()
            .await
            .map_err(|e| WatchError::ConfigError {
                reason: e.to_string(),
            })?;
        let events = source.subscribe().await?;

        let context = TypegenContext::new(target, snapshot);
        let stats = Arc::new(WatchStats::default());

        stats.set_state(WatchState::Generating);
        let written = generate(context.clone()).await;
        stats.set_state(WatchState::Idle);
        let written = match written {
            Ok(written) => written,
            Err(e) => {
                source.close().await;
                return Err(e);
            }
        };
        stats.passes.fetch_add(1, Ordering::SeqCst);
        sink.info(
            &format!("Generated types for {} routes", written.routes),
            LogOptions::timestamped(),
        );

        let cancel = CancellationToken::new();
        let stopped = CancellationToken::new();
        let orchestrator = Self {
            source,
            context,
            events,
            sink,
            stats: Arc::clone(&stats),
            cancel: cancel.clone(),
            stopped: stopped.clone(),
            dirty: false,
        };
        let task = tokio::spawn(orchestrator.run());

        Ok(WatchHandle {
            cancel,
            stopped,
            task,
            stats,
        })
    }

    async fn run(mut self) {
        crate::log_event!("watcher", "started");

        loop {
            let change = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                change = self.events.recv() => match change {
                    Some(change) => change,
                    None => {
                        crate::debug_event!("watcher", "change stream ended");
                        break;
                    }
                },
            };

            if let Some(pending) = self.coalesce(change) {
                self.apply(pending).await;
            }
        }

        self.source.close().await;
        self.stats.set_state(WatchState::Closed);
        self.stopped.cancel();
        crate::log_event!("watcher", "closed");
    }

    /// Fold `first` and every change already queued behind it into one
    /// pending reload. Failed reloads are reported as they are seen.
    fn coalesce(&mut self, first: ConfigChange) -> Option<PendingReload> {
        let mut pending: Option<PendingReload> = None;
        let mut next = Some(first);

        while let Some(change) = next {
            self.stats.events.fetch_add(1, Ordering::SeqCst);

            match change.result {
                Err(message) => {
                    self.stats.failures.fetch_add(1, Ordering::SeqCst);
                    self.sink.error(
                        &format!("Route config reload failed: {message}"),
                        LogOptions::timestamped(),
                    );
                }
                Ok(snapshot) => {
                    let (config_changed, route_config_changed) = match &pending {
                        Some(prev) => (
                            prev.config_changed || change.config_changed,
                            prev.route_config_changed || change.route_config_changed,
                        ),
                        None => (change.config_changed, change.route_config_changed),
                    };
                    if pending.is_some() {
                        crate::debug_event!("watcher", "superseded queued reload");
                    }
                    pending = Some(PendingReload {
                        snapshot,
                        config_changed,
                        route_config_changed,
                    });
                }
            }

            next = self.events.try_recv().ok();
        }

        pending
    }

    async fn apply(&mut self, pending: PendingReload) {
        let relevant = pending.config_changed || pending.route_config_changed || self.dirty;
        self.context = self.context.with_config(pending.snapshot);

        if !relevant {
            crate::debug_event!("watcher", "no type-relevant change");
            return;
        }

        self.stats.set_state(WatchState::Generating);
        let result = generate(self.context.clone()).await;
        self.stats.set_state(WatchState::Idle);

        match result {
            Ok(written) => {
                self.dirty = false;
                self.stats.passes.fetch_add(1, Ordering::SeqCst);
                self.sink.info(
                    &format!("Regenerated types for {} routes", written.routes),
                    LogOptions::fresh_screen(),
                );
            }
            Err(e) => {
                self.dirty = true;
                self.stats.failures.fetch_add(1, Ordering::SeqCst);
                self.sink.error(&e.to_string(), LogOptions::timestamped());
            }
        }
    }
}

/// Run one write pass off the async runtime.
async fn generate(context: TypegenContext) -> Result<WriteStats, WatchError> {
    let to_err = |reason: String| WatchError::GenerationFailed { reason };
    tokio::task::spawn_blocking(move || write_all(&context))
        .await
        .map_err(|e| to_err(e.to_string()))?
        .map_err(|e| to_err(e.to_string()))
}

/// Handle to a running orchestrator.
pub struct WatchHandle {
    cancel: CancellationToken,
    stopped: CancellationToken,
    task: JoinHandle<()>,
    stats: Arc<WatchStats>,
}

impl WatchHandle {
    pub fn stats(&self) -> &WatchStats {
        &self.stats
    }

    pub fn state(&self) -> WatchState {
        self.stats.state()
    }

    /// Resolves once the orchestrator has stopped, either through
    /// [`close`](Self::close) or because the change stream ended.
    pub async fn stopped(&self) {
        self.stopped.cancelled().await;
    }

    /// Stop watching. Waits for a pass in flight; leaves output on disk.
    pub async fn close(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!("[watcher] orchestrator task failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip() {
        for state in [WatchState::Idle, WatchState::Generating, WatchState::Closed] {
            assert_eq!(WatchState::from_u8(state.as_u8()), state);
        }
        assert_eq!(WatchStats::default().state(), WatchState::Idle);
    }
}
