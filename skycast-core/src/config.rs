use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::model::ForecastMode;

/// Environment fallback for the provider credential, so the key never has
/// to live in the repository or on the command line.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// forecast_mode = "daily"
/// days = 7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// weatherapi.com API key.
    pub api_key: Option<String>,

    /// Default forecast granularity, "daily" or "hourly".
    pub forecast_mode: Option<String>,

    /// Default forecast window in days (1..=7).
    pub days: Option<u8>,
}

impl Config {
    /// Return the configured forecast mode as a strongly-typed value.
    /// Unset means daily.
    pub fn forecast_mode_id(&self) -> Result<ForecastMode> {
        match self.forecast_mode.as_deref() {
            Some(s) => ForecastMode::try_from(s),
            None => Ok(ForecastMode::Daily),
        }
    }

    /// Store the forecast mode as a string.
    pub fn set_forecast_mode(&mut self, mode: ForecastMode) {
        self.forecast_mode = Some(mode.as_str().to_string());
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// The config-file key, falling back to `SKYCAST_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| env::var(API_KEY_ENV).ok())
    }

    pub fn is_configured(&self) -> bool {
        self.resolve_api_key().is_some()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
