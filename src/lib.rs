pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod routes;
pub mod typegen;
pub mod watcher;

pub use config::Settings;
pub use error::{TypegenError, TypegenResult};
pub use loader::{ConfigChange, ConfigSource, FileConfigSource, LoadError, load_snapshot};
pub use routes::{ConfigSnapshot, FutureFlags, ParamDescriptor, RouteEntry, RouteTree, parse_params};
pub use typegen::{OutputTarget, TypegenContext, WriteStats, write_all};
pub use watcher::{LogOptions, LogSink, Orchestrator, WatchError, WatchHandle, WatchState};
