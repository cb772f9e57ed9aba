//! Layered settings for the generator.
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - `typegen.toml` in the project root (or a file given with `--config`)
//! - environment variables
//!
//! # Environment Variables
//!
//! Prefixed with `ROUTE_TYPEGEN_`, double underscore separates nested levels:
//! - `ROUTE_TYPEGEN_OUTPUT_DIR=types` sets `output_dir`
//! - `ROUTE_TYPEGEN_WATCH__DEBOUNCE_MS=250` sets `watch.debounce_ms`
//! - `ROUTE_TYPEGEN_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "typegen.toml";
pub const ENV_PREFIX: &str = "ROUTE_TYPEGEN_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the settings schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output directory, relative to the project root. Wiped on every pass.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Route config file, relative to the project root
    #[serde(default = "default_route_config")]
    pub route_config: PathBuf,

    /// Module the generated declarations augment
    #[serde(default = "default_framework_module")]
    pub framework_module: String,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchConfig {
    /// Quiet period after the last route config change before reloading
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Log levels: a default plus per-module overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,

    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 { 1 }
fn default_output_dir() -> PathBuf { PathBuf::from(".react-router/types") }
fn default_route_config() -> PathBuf { PathBuf::from("routes.toml") }
fn default_framework_module() -> String { "react-router".to_string() }
fn default_debounce_ms() -> u64 { 100 }
fn default_log_level() -> String { "warn".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            output_dir: default_output_dir(),
            route_config: default_route_config(),
            framework_module: default_framework_module(),
            watch: WatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings for the project at `root_dir`.
    pub fn load(root_dir: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::load_from(root_dir.as_ref().join(SETTINGS_FILE))
    }

    /// Load settings from a specific file. A missing file yields defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".") // Double underscore becomes dot
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Absolute route config path for the project at `root_dir`.
    pub fn route_config_path(&self, root_dir: impl AsRef<Path>) -> PathBuf {
        root_dir.as_ref().join(&self.route_config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Write a default `typegen.toml` and, when missing, a starter route
    /// config into `root_dir`.
    pub fn init_config_file(
        root_dir: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let root_dir = root_dir.as_ref();
        let config_path = root_dir.join(SETTINGS_FILE);

        if !force && config_path.exists() {
            return Err("Settings file already exists. Use --force to overwrite".into());
        }

        let settings = Settings::default();
        settings.save(&config_path)?;

        let routes_path = settings.route_config_path(root_dir);
        if !routes_path.exists() {
            std::fs::write(&routes_path, STARTER_ROUTES)?;
        }

        Ok(config_path)
    }
}

const STARTER_ROUTES: &str = r#"# Route config read by route-typegen.
#
# A route's parent is its id minus the last `/` component (or the root),
# unless `parent_id` is given.

app_directory = "app"

[future]
unstable_middleware = false

[[routes]]
id = "root"
file = "root.tsx"

[[routes]]
id = "home"
file = "routes/home.tsx"
index = true

[[routes]]
id = "posts"
path = "posts/:slug"
file = "routes/post.tsx"
"#;
