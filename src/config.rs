//! Caret configuration persistence
//!
//! Stores user preferences in `~/.config/caret/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::timer::{BlinkTimerConfig, DEFAULT_BLINK_INTERVAL_MS};

/// Caret configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaretConfig {
    /// Selected theme id (e.g., "default-dark", "default-light")
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Blink half-period in milliseconds; zero or negative disables blinking
    #[serde(default = "default_blink_interval")]
    pub blink_interval_ms: i64,
    /// Font file for the pre-edit text; falls back to well-known system fonts
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Font size in logical pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_blink_interval() -> i64 {
    DEFAULT_BLINK_INTERVAL_MS
}

fn default_font_size() -> f32 {
    14.0
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            blink_interval_ms: default_blink_interval(),
            font_path: None,
            font_size: default_font_size(),
        }
    }
}

impl CaretConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Blink timer settings derived from `blink_interval_ms`
    pub fn blink_timer_config(&self) -> BlinkTimerConfig {
        BlinkTimerConfig::from_millis(self.blink_interval_ms)
    }

    /// Font files to try, configured path first
    pub fn font_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.font_path {
            candidates.push(path.clone());
        }
        candidates.extend(crate::config_paths::system_font_candidates());
        candidates
    }
}
