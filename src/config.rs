//! Configuration management module.
//!
//! Handles loading and saving host configuration from a JSON file next to
//! the executable.

use crate::core::tab::{Format, Scope};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Format used when a single click copies the active tab.
    #[serde(default)]
    pub default_format: Format,
    /// Scope used when a gesture (rather than an explicit menu choice)
    /// triggers the copy.
    #[serde(default)]
    pub default_scope: Scope,
    #[serde(default = "default_click_threshold_ms")]
    pub click_threshold_ms: u64,
    #[serde(default = "default_idle_reset_ms")]
    pub idle_reset_ms: u64,
    #[serde(default = "default_badge_clear_ms")]
    pub badge_clear_ms: u64,
}

fn default_click_threshold_ms() -> u64 {
    500
}

fn default_idle_reset_ms() -> u64 {
    1000
}

fn default_badge_clear_ms() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: Format::TitleAndUrl,
            default_scope: Scope::ThisTab,
            click_threshold_ms: default_click_threshold_ms(),
            idle_reset_ms: default_idle_reset_ms(),
            badge_clear_ms: default_badge_clear_ms(),
        }
    }
}

impl Config {
    pub fn click_threshold(&self) -> Duration {
        Duration::from_millis(self.click_threshold_ms)
    }

    pub fn idle_reset(&self) -> Duration {
        Duration::from_millis(self.idle_reset_ms)
    }

    pub fn badge_clear(&self) -> Duration {
        Duration::from_millis(self.badge_clear_ms)
    }
}

/// Configuration manager for loading/saving config.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let config_path = Self::get_exe_directory().join("tabclip_config.json");
        Self { config_path }
    }

    /// Get the directory containing the executable.
    fn get_exe_directory() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the config file path.
    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from file; a missing or corrupt file yields the
    /// defaults.
    pub fn load(&self) -> Config {
        self.try_load().unwrap_or_default()
    }

    fn try_load(&self) -> Option<Config> {
        if !self.config_path.exists() {
            return None;
        }

        let content = fs::read_to_string(&self.config_path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Save configuration to file.
    pub fn save(&self, config: &Config) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        fs::write(&self.config_path, json)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
