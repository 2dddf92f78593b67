//! buildinfo - Build provenance records
//!
//! CLI entry point that dispatches to subcommands.

use buildinfo::cli::{Cli, Commands};
use buildinfo::config::{Config, ConfigManager};
use buildinfo::error::BuildInfoResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BuildInfoResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::resolve(cli.config.clone());
    // A broken config file must not block `config init --force`
    let mut config = match (config_manager.load().await, &cli.command) {
        (Ok(config), _) => config,
        (Err(e), Commands::Config(_)) => {
            eprintln!("{} {}", style("Warning:").yellow(), e);
            Config::default()
        }
        (Err(e), _) => return Err(e),
    };
    if cli.compact {
        config.output.pretty = false;
    }

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let verbosity = if config.general.verbose {
        cli.verbose.max(1)
    } else {
        cli.verbose
    };
    let filter = match verbosity {
        0 => EnvFilter::new("buildinfo=warn"),
        1 => EnvFilter::new("buildinfo=info"),
        _ => EnvFilter::new("buildinfo=debug"),
    };

    // Logs go to stderr so records on stdout stay parseable
    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Accumulate(args) => buildinfo::cli::commands::accumulate(args, &config).await,
        Commands::Finalize(args) => buildinfo::cli::commands::finalize(args, &config).await,
        Commands::Format(args) => buildinfo::cli::commands::format(args, &config).await,
        Commands::Inspect(args) => buildinfo::cli::commands::inspect(args, &config).await,
        Commands::Decode(args) => buildinfo::cli::commands::decode(args, &config).await,
        Commands::Encode(args) => buildinfo::cli::commands::encode(args, &config).await,
        Commands::Config(args) => {
            buildinfo::cli::commands::config(args, &config_manager, &config).await
        }
    }
}
