//! Typegen command - one-shot generation or watch mode.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::loader::{FileConfigSource, load_snapshot};
use crate::typegen::{OutputTarget, TypegenContext, write_all};
use crate::watcher::{ConsoleSink, Orchestrator};

/// Arguments for the typegen command.
pub struct TypegenArgs {
    pub mode: String,
    pub watch: bool,
}

/// Run the typegen command.
pub async fn run(args: TypegenArgs, root: &Path, settings: &Settings) -> anyhow::Result<()> {
    let route_config = settings.route_config_path(root);
    let target = OutputTarget::from_settings(root, settings);

    if !args.watch {
        return generate_once(&route_config, &args.mode, target);
    }

    crate::log_event!(
        "typegen",
        "watching",
        "{} (debounce {}ms)",
        route_config.display(),
        settings.watch.debounce_ms
    );

    let source = FileConfigSource::new(&route_config, args.mode, settings.watch.debounce_ms);
    let handle = Orchestrator::start(source, target, Arc::new(ConsoleSink::new()))
        .await
        .context("failed to start watch mode")?;

    eprintln!(
        "{} {}",
        style("Watching").green().bold(),
        route_config.display()
    );
    eprintln!("Press Ctrl+C to stop");

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
        }
        _ = handle.stopped() => {
            eprintln!("Route config watcher stopped unexpectedly");
        }
    }

    handle.close().await;
    eprintln!("Stopped watching");
    Ok(())
}

fn generate_once(route_config: &Path, mode: &str, target: OutputTarget) -> anyhow::Result<()> {
    let snapshot = load_snapshot(route_config, mode)
        .with_context(|| format!("failed to load {}", route_config.display()))?;

    let ctx = TypegenContext::new(target, Arc::new(snapshot));
    let stats = write_all(&ctx)?;

    println!(
        "Generated types for {} routes ({} files) in {}",
        stats.routes,
        stats.files,
        ctx.output_dir().display()
    );
    Ok(())
}
