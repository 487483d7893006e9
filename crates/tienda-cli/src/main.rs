//! Tienda CLI
//!
//! Starts the online store API server, or manages its configuration.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tienda_cli::TiendaConfig;
use tienda_cli::cli::{Cli, Command};
use tienda_cli::config_handlers::handle_config_command;
use tienda_cli::serve::{apply_serve_args, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone();

    match cli.into_command() {
        Command::Serve(args) => {
            let mut config =
                TiendaConfig::load(config_path.as_deref()).context("Failed to load config")?;
            apply_serve_args(&mut config, &args);
            init_logging(&config.logging.level);

            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting tienda");
            serve(&config).await?;
        }
        Command::Config { action } => {
            handle_config_command(config_path.as_deref(), action)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level.
fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}
