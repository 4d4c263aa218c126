//! Launch module
//!
//! Hands a path to the operating system's default handler.

use crate::core::error::{LauncherError, Result};
use std::path::Path;

/// Something that can start a game or program by path
pub trait Launch {
    fn open(&mut self, path: &Path) -> Result<()>;
}

/// Uses the OS default handler (xdg-open, `start`, `open`)
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launch for SystemLauncher {
    fn open(&mut self, path: &Path) -> Result<()> {
        tracing::info!("Launching {:?}", path);
        open::that_detached(path).map_err(|e| LauncherError::LaunchFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
