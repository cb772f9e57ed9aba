//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Route param type generator
#[derive(Parser)]
#[command(
    name = "route-typegen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate TypeScript declarations for route params",
    long_about = "Generate per-route TypeScript declarations and a global params registry \
                  from a route config, once or continuously in watch mode.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to a custom typegen.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Project root the command operates on.
    pub fn root(&self) -> PathBuf {
        match &self.command {
            Commands::Init { root, .. }
            | Commands::Typegen { root, .. }
            | Commands::Config { root } => root.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create typegen.toml and a starter route config
    Init {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Overwrite an existing typegen.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Generate route type declarations
    #[command(
        after_help = "Examples:\n  route-typegen typegen\n  route-typegen typegen ./web --watch\n  route-typegen typegen --mode development"
    )]
    Typegen {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Build mode recorded in the config snapshot
        #[arg(long, default_value = "production", env = "ROUTE_TYPEGEN_MODE")]
        mode: String,

        /// Keep running and regenerate when the route config changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Display active settings
    Config {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}
