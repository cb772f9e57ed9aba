//! Watch mode: regenerate declarations when the route config changes.
//!
//! # Architecture
//!
//! ```text
//! FileConfigSource (loader)
//!   - notify::RecommendedWatcher on the config's directory
//!   - Debouncer collapses save bursts
//!   - reload + classify -> ConfigChange
//!         |
//!         v  mpsc
//! Orchestrator
//!   - owns the current snapshot (TypegenContext)
//!   - coalesces queued changes, one write pass at a time
//!   - reports through a LogSink
//! ```

mod debouncer;
mod error;
pub mod orchestrator;
pub mod sink;

pub use debouncer::Debouncer;
pub use error::WatchError;
pub use orchestrator::{Orchestrator, WatchHandle, WatchState, WatchStats};
pub use sink::{ConsoleSink, LogOptions, LogSink};
