//! gamedeck - personal game library launcher
//!
//! Entry point for CLI and GUI modes.

mod cli;
mod gui;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "gamedeck=debug" } else { "gamedeck=info" })
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let config = match &args.config {
        Some(path) => gamedeck::config::load_from(path),
        None => gamedeck::config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(command) = args.command {
        return cli::run(command, config);
    }

    // GUI mode: Start the launcher window
    tracing::info!("Starting gamedeck");
    gui::run(config)
}
