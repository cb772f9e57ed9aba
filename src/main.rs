use clap::Parser;
use route_typegen::Settings;
use route_typegen::cli::commands::{init, typegen};
use route_typegen::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let root = cli.root();

    // `init` must work before any settings file exists
    if let Commands::Init { force, .. } = cli.command {
        init::run_init(&root, force);
        return;
    }

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(&root),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    route_typegen::logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Config { .. } => init::run_config(&settings),
        Commands::Typegen { mode, watch, .. } => {
            let args = typegen::TypegenArgs { mode, watch };
            if let Err(e) = typegen::run(args, &root, &settings).await {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
        Commands::Init { .. } => {}
    }
}
