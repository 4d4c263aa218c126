//! Configuration module
//!
//! Handles loading and saving launcher configuration.

mod schema;

pub use schema::{
    AudioConfig, Config, ExternalLauncher, GeneralConfig, LaunchersConfig, LibraryConfig,
    NetworkConfig, SidebarConfig,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gamedeck")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load configuration from the default location
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

/// Load configuration, writing defaults if the file does not exist yet
pub fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    } else {
        // Create default config
        let config = Config::default();
        save_to(&config, path)?;
        Ok(config)
    }
}

/// Save configuration to disk
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    // Ensure config directory exists
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    tracing::info!("Configuration saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.general.poll_interval_ms, 100);

        let again = load_from(&path).unwrap();
        assert_eq!(again.library.file, config.library.file);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\npoll_interval_ms = ").unwrap();
        assert!(load_from(&path).is_err());
    }
}
