//! Command implementations for the CLI.

pub mod init;
pub mod typegen;
