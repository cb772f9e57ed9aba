//! Error types for route config loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::TypegenError;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Route config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid route config: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error("Invalid route tree: {0}")]
    Tree(#[from] TypegenError),
}
