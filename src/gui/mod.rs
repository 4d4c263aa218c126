//! GUI module
//!
//! egui-based launcher window.

mod app;

use anyhow::{Context, Result};
use gamedeck::{Config, LauncherContext};

/// Run the GUI application
pub fn run(config: Config) -> Result<()> {
    let launcher = LauncherContext::open(config).context("Failed to open the game library")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("gamedeck"),
        ..Default::default()
    };

    eframe::run_native(
        "gamedeck",
        options,
        Box::new(|_cc| Ok(Box::new(app::LauncherApp::new(launcher)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
