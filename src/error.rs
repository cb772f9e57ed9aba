//! Error types for the type generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypegenError {
    #[error("Route '{id}' is not in the route tree")]
    UnknownRoute { id: String },

    #[error("Route '{id}' names parent '{parent}' which is not in the route tree")]
    MissingParent { id: String, parent: String },

    #[error("Route '{id}' is part of a parent cycle")]
    ParentCycle { id: String },

    #[error("Duplicate route id: {0}")]
    DuplicateRoute(String),

    #[error("Root route '{0}' is missing from the route tree")]
    MissingRoot(String),

    #[error("Routes '{first}' and '{second}' both generate {path}")]
    TypesPathCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Refusing to use output directory {output}: clearing it would delete {protected}")]
    UnsafeOutputDir { output: PathBuf, protected: PathBuf },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clear output directory {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TypegenResult<T> = Result<T, TypegenError>;
