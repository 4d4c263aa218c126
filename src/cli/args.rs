//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gamedeck - personal game library launcher
#[derive(Parser, Debug)]
#[command(name = "gamedeck")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Use this configuration file instead of ~/.gamedeck/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommands (none opens the launcher window)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered games
    List,

    /// Register a game executable
    Add {
        /// Path to the executable
        path: PathBuf,
        /// Display name (defaults to the file name without extension)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove a game by id
    Remove {
        id: u64,
    },

    /// Set a game's cover from a file, URL or data:image value
    Cover {
        id: u64,
        source: String,
    },

    /// Launch a game by id
    Launch {
        id: u64,
    },

    /// List available themes
    Themes,
}
