//! Application configuration stored in the platform app-data directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "neuroq";
const CONFIG_FILE: &str = "config.json";
const API_BASE_ENV: &str = "NEUROQ_API_BASE";

/// Built-in API base when nothing overrides it.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// On-disk configuration. Missing fields fall back to defaults so partial
/// config files keep working across versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the study index API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: AppConfig =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Resolve the API base URL. Priority: explicit flag, `NEUROQ_API_BASE`,
/// config file, built-in default.
pub fn resolve_api_base(flag: Option<&str>) -> String {
    if let Some(base) = flag {
        return base.to_string();
    }
    if let Ok(base) = std::env::var(API_BASE_ENV) {
        if !base.is_empty() {
            return base;
        }
    }
    AppConfig::load()
        .map(|c| c.api_base)
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
