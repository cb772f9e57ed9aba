//! Declaration generation.
//!
//! Turns a [`ConfigSnapshot`] into the complete output set:
//!
//! ```text
//! <output_dir>/
//!   +register.ts               global fullpath -> params map
//!   +server-build.d.ts         static server build module
//!   <app>/+types/root.ts       one file per route, placed by route id
//!   <app>/blog/+types/post.ts
//! ```
//!
//! Generation is pure; only [`writer::write_all`] touches the filesystem.

pub mod register;
pub mod route;
pub mod server_build;
pub mod ts;
pub mod writer;

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::{SETTINGS_FILE, Settings};
use crate::error::{TypegenError, TypegenResult};
use crate::routes::ConfigSnapshot;

pub use writer::{WriteStats, write_all};

/// Where and for which framework module the output is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Project root the route config and output dir are resolved against.
    pub root_dir: PathBuf,
    /// Output directory. Owned entirely by the generator.
    pub output_dir: PathBuf,
    /// Module specifier of the host framework being augmented.
    pub framework_module: String,
    /// Paths besides the project root that clearing the output must never
    /// delete.
    pub protected: Vec<PathBuf>,
}

impl OutputTarget {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        output_dir: impl AsRef<Path>,
        framework_module: impl Into<String>,
    ) -> Self {
        let root_dir = root_dir.into();
        let output_dir = root_dir.join(output_dir);
        Self {
            root_dir,
            output_dir,
            framework_module: framework_module.into(),
            protected: Vec::new(),
        }
    }

    /// Target for `settings`, protecting the route config and settings file.
    pub fn from_settings(root_dir: impl Into<PathBuf>, settings: &Settings) -> Self {
        let root_dir = root_dir.into();
        let route_config = settings.route_config_path(&root_dir);
        let settings_file = root_dir.join(SETTINGS_FILE);
        Self::new(root_dir, &settings.output_dir, settings.framework_module.clone())
            .with_protected(route_config)
            .with_protected(settings_file)
    }

    pub fn with_protected(mut self, path: impl Into<PathBuf>) -> Self {
        self.protected.push(path.into());
        self
    }

    /// Fails when clearing the output dir would remove the project root or
    /// a protected path, i.e. when the output dir is one of them or an
    /// ancestor of one.
    pub fn check_output_dir(&self) -> TypegenResult<()> {
        let output = normalize(&self.output_dir);
        let guarded = std::iter::once(&self.root_dir).chain(self.protected.iter());
        for path in guarded {
            if normalize(path).starts_with(&output) {
                return Err(TypegenError::UnsafeOutputDir {
                    output: self.output_dir.clone(),
                    protected: path.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Everything one generation pass reads.
///
/// Owned by the caller (the watch orchestrator or the one-shot command) and
/// passed explicitly, so passes share no global state.
#[derive(Debug, Clone)]
pub struct TypegenContext {
    pub target: OutputTarget,
    pub config: Arc<ConfigSnapshot>,
}

impl TypegenContext {
    pub fn new(target: OutputTarget, config: Arc<ConfigSnapshot>) -> Self {
        Self { target, config }
    }

    /// Same target, new snapshot.
    pub fn with_config(&self, config: Arc<ConfigSnapshot>) -> Self {
        Self {
            target: self.target.clone(),
            config,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.target.output_dir
    }
}
