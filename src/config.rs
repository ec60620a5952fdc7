//! # Configuration Module
//!
//! Configuration file handling and config directory setup for AdaptiveDrive.
//!
//! ## Location
//!
//! The configuration lives in the platform-standard config directory:
//! - Linux: `~/.config/adaptive-drive/config.json`
//! - macOS: `~/Library/Application Support/adaptive-drive/config.json`
//! - Windows: `%APPDATA%\adaptive-drive\config.json`
//!
//! A missing file means "use the defaults". Every field is optional, so a
//! config file only needs to mention what it changes:
//!
//! ```json
//! {
//!   "settle_window_ms": 250,
//!   "thresholds": { "high_speed_kmh": 110 },
//!   "catalog_path": "/home/me/drive-catalog.json"
//! }
//! ```

use crate::algorithm::WeatherPolicy;
use crate::mode::ModeThresholds;
use anyhow::{Context, Result};
use log::{debug, info};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "adaptive-drive";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-appropriate config directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system config directory cannot be determined
/// - The `adaptive-drive` subdirectory cannot be created
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!(
            "Could not determine system config directory. Please ensure your platform supports standard config directories."
        ))?;

    let app_dir = config_dir.join(APP_DIR);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!(
            "Failed to create AdaptiveDrive config directory at {}. Please check file permissions.",
            app_dir.display()
        ))?;

    Ok(app_dir)
}

/// Returns the default config file path.
///
/// # Errors
///
/// Same as [`get_config_dir`].
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Quiet period before a context update is evaluated.
    pub settle_window_ms: u64,
    pub thresholds: ModeThresholds,
    pub weather: WeatherPolicy,
    /// Catalog file; the built-in demo catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settle_window_ms: 400,
            thresholds: ModeThresholds::default(),
            weather: WeatherPolicy::default(),
            catalog_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Load from the default location, falling back to defaults if no file
    /// exists there yet.
    ///
    /// # Errors
    ///
    /// Fails if the config directory cannot be resolved or the file exists
    /// but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load from an explicit path, falling back to defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let shown = path.absolutize().map_or_else(|_| path.to_path_buf(), |p| p.into_owned());

        if !path.exists() {
            debug!("No config at {}, using defaults", shown.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", shown.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", shown.display()))?;

        info!("Loaded configuration from {}", shown.display());
        Ok(config)
    }

    /// Write this configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    #[must_use]
    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_window_ms)
    }
}
