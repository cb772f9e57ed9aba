//! Route config loading and change notification.
//!
//! The generator consumes configuration through [`ConfigSource`]:
//!
//! ```text
//! get_config()  -> initial snapshot (failure is fatal to the watcher)
//! subscribe()   -> stream of ConfigChange { result, config_changed, route_config_changed }
//! close()       -> stop producing changes
//! ```
//!
//! [`FileConfigSource`] implements it for a TOML route config on disk.

mod error;
mod file;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use figment::Figment;
use figment::providers::{Format, Toml};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::routes::{ConfigSnapshot, DEFAULT_ROOT_ID, FutureFlags, RouteEntry, RouteTree};
use crate::watcher::WatchError;

pub use error::LoadError;
pub use file::FileConfigSource;

/// On-disk shape of the route config.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfigFile {
    #[serde(default = "default_app_directory")]
    pub app_directory: String,

    #[serde(default = "default_root_id")]
    pub root_id: String,

    #[serde(default)]
    pub future: FutureFlags,

    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

fn default_app_directory() -> String { "app".to_string() }
fn default_root_id() -> String { DEFAULT_ROOT_ID.to_string() }

/// Read and validate a route config into a snapshot.
pub fn load_snapshot(path: impl AsRef<Path>, mode: &str) -> Result<ConfigSnapshot, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file: RouteConfigFile = Figment::from(Toml::file(path))
        .extract()
        .map_err(Box::new)?;
    let routes = RouteTree::build(file.root_id, file.routes)?;

    Ok(ConfigSnapshot::new(file.app_directory, mode, file.future, routes))
}

/// One reload notification.
#[derive(Debug, Clone)]
pub struct ConfigChange {
    /// New snapshot, or the reload error message.
    pub result: Result<Arc<ConfigSnapshot>, String>,
    /// General configuration (app directory, mode, future flags) changed.
    pub config_changed: bool,
    /// Route tree changed.
    pub route_config_changed: bool,
}

impl ConfigChange {
    /// Successful reload, flags computed against the previous snapshot.
    pub fn between(prev: &ConfigSnapshot, next: Arc<ConfigSnapshot>) -> Self {
        Self {
            config_changed: prev.config_differs(&next),
            route_config_changed: prev.routes_differ(&next),
            result: Ok(next),
        }
    }

    /// Successful load with nothing to compare against.
    pub fn initial(next: Arc<ConfigSnapshot>) -> Self {
        Self {
            result: Ok(next),
            config_changed: true,
            route_config_changed: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            config_changed: false,
            route_config_changed: false,
        }
    }

    /// Whether anything that affects generated output changed.
    pub fn is_relevant(&self) -> bool {
        self.config_changed || self.route_config_changed
    }
}

/// Provider of configuration snapshots and change notifications.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load the current configuration.
    async fn get_config(&self) -> Result<Arc<ConfigSnapshot>, LoadError>;

    /// Start producing change notifications.
    async fn subscribe(&self) -> Result<mpsc::Receiver<ConfigChange>, WatchError>;

    /// Stop producing change notifications.
    async fn close(&self);
}
