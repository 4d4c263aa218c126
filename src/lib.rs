//! gamedeck library root
//!
//! Re-exports core functionality for the binary and tests.

pub mod config;
pub mod core;
pub mod util;

pub use config::Config;
pub use core::{LauncherContext, LauncherError};
