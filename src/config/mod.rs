// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! notification preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep errors on screen a little longer
//! config.notifications.error_ms = Some(12_000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```
//!
//! ```toml
//! [notifications]
//! success_ms = 3000
//! info_ms = 5000
//! warning_ms = 5000
//! error_ms = 8000
//!
//! [diagnostics]
//! buffer_capacity = 1000
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastQueue";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Auto-dismiss delays per kind, in milliseconds.
///
/// Pending notifications are never listed here: they stay until resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_ms: Option<u64>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            success_ms: Some(DEFAULT_SUCCESS_LIFETIME_MS),
            info_ms: Some(DEFAULT_INFO_LIFETIME_MS),
            warning_ms: Some(DEFAULT_WARNING_LIFETIME_MS),
            error_ms: Some(DEFAULT_ERROR_LIFETIME_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a config file, falling back to defaults if the TOML is invalid.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring invalid config: {err}");
            Ok(Config::default())
        }
    }
}

/// Writes a config file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_lifetimes() {
        let config = Config {
            notifications: NotificationsConfig {
                success_ms: Some(1_500),
                info_ms: None,
                warning_ms: Some(4_000),
                error_ms: Some(20_000),
            },
            diagnostics: DiagnosticsConfig {
                buffer_capacity: Some(250),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_path_fills_missing_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[notifications]\nerror_ms = 9000\n")
            .expect("failed to write partial toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.notifications.error_ms, Some(9_000));
        assert_eq!(loaded.notifications.success_ms, None);
        assert_eq!(loaded.diagnostics, DiagnosticsConfig::default());
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_uses_default_lifetimes() {
        let config = Config::default();
        assert_eq!(
            config.notifications.success_ms,
            Some(DEFAULT_SUCCESS_LIFETIME_MS)
        );
        assert_eq!(config.notifications.error_ms, Some(DEFAULT_ERROR_LIFETIME_MS));
        assert_eq!(
            config.diagnostics.buffer_capacity,
            Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
        );
    }
}
