//! Configuration schema
//!
//! Defines the structure of the configuration file.

use crate::core::selection::SidebarAction;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub launchers: LaunchersConfig,

    #[serde(default)]
    pub sidebar: SidebarConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub audio: AudioConfig,
}

/// General launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Interval between gamepad/music polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Close launcher after a game starts
    #[serde(default)]
    pub close_on_launch: bool,

    /// Directory holding theme backgrounds
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,
}

impl GeneralConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            close_on_launch: false,
            resource_dir: default_resource_dir(),
        }
    }
}

/// Where the library and its covers live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_library_file")]
    pub file: PathBuf,

    #[serde(default = "default_cover_dir")]
    pub cover_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            file: default_library_file(),
            cover_dir: default_cover_dir(),
        }
    }
}

/// An external program reachable from the sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalLauncher {
    pub label: String,
    /// Path or URL handed to the OS (empty = not configured)
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchersConfig {
    #[serde(default = "default_primary")]
    pub primary: ExternalLauncher,

    #[serde(default = "default_secondary")]
    pub secondary: ExternalLauncher,
}

impl Default for LaunchersConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarConfig {
    /// Order of the sidebar entries
    #[serde(default = "SidebarAction::default_set")]
    pub actions: Vec<SidebarAction>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            actions: SidebarAction::default_set(),
        }
    }
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Cover download timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

/// Background music
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default)]
    pub tracks: Vec<PathBuf>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            tracks: Vec::new(),
        }
    }
}

// Default value functions for serde
fn default_poll_interval() -> u64 {
    100
}
fn default_resource_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_library_file() -> PathBuf {
    PathBuf::from("games.json")
}
fn default_cover_dir() -> PathBuf {
    PathBuf::from("covers")
}
fn default_primary() -> ExternalLauncher {
    ExternalLauncher {
        label: "Steam".to_string(),
        path: "steam://open/main".to_string(),
    }
}
fn default_secondary() -> ExternalLauncher {
    ExternalLauncher {
        label: "Epic Games".to_string(),
        path: "com.epicgames.launcher://store".to_string(),
    }
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f32 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.poll_interval_ms, 100);
        assert_eq!(config.library.file, PathBuf::from("games.json"));
        assert_eq!(config.library.cover_dir, PathBuf::from("covers"));
        assert_eq!(config.sidebar.actions, SidebarAction::default_set());
        assert_eq!(config.network.timeout_seconds, 30);
        assert!(config.audio.enabled);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [sidebar]
            actions = ["primary-launcher", "secondary-launcher", "play-selected", "change-theme"]

            [audio]
            volume = 0.2
            tracks = ["music/one.ogg"]
            "#,
        )
        .unwrap();
        assert_eq!(config.sidebar.actions.len(), 4);
        assert_eq!(config.sidebar.actions[2], SidebarAction::PlaySelected);
        assert_eq!(config.audio.volume, 0.2);
        assert_eq!(config.audio.tracks, vec![PathBuf::from("music/one.ogg")]);
        assert_eq!(config.launchers.primary.label, "Steam");
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.general.poll_interval_ms, config.general.poll_interval_ms);
        assert_eq!(back.sidebar.actions, config.sidebar.actions);
        assert_eq!(back.launchers.secondary.path, config.launchers.secondary.path);
    }
}
