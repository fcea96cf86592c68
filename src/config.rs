//! Environment-driven configuration for the two entry points.
//!
//! Defaults mirror the original feed conventions (`F-A0010-001.json`
//! snapshot in the working directory, `data.db` / `weather_data.db`
//! database files). Components never read these values themselves; the
//! binaries resolve them here and pass paths down as parameters.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is not set")]
    MissingVar(&'static str),
}

/// Settings for the offline snapshot importer.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Path of the pre-downloaded feed snapshot.
    pub feed_file: PathBuf,
    /// Target SQLite database file.
    pub database: PathBuf,
    /// Target table name.
    pub table: String,
}

impl ImporterConfig {
    pub fn from_env() -> ImporterConfig {
        ImporterConfig {
            feed_file: env_or("AGWEATHER_FEED_FILE", "F-A0010-001.json").into(),
            database: env_or("AGWEATHER_IMPORTER_DB", "data.db").into(),
            table: env_or("AGWEATHER_IMPORTER_TABLE", "weather_forecast"),
        }
    }
}

/// Settings for the live dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CWA open-data authorization key.
    pub api_key: String,
    /// Target SQLite database file.
    pub database: PathBuf,
    /// Target table name.
    pub table: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl DashboardConfig {
    /// Reads the dashboard settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when `CWA_AUTHORIZATION` is not
    /// set; the key is a credential and has no default.
    pub fn from_env() -> Result<DashboardConfig, ConfigError> {
        let api_key =
            env::var("CWA_AUTHORIZATION").map_err(|_| ConfigError::MissingVar("CWA_AUTHORIZATION"))?;
        Ok(DashboardConfig {
            api_key,
            database: env_or("AGWEATHER_DASHBOARD_DB", "weather_data.db").into(),
            table: env_or("AGWEATHER_DASHBOARD_TABLE", "weather"),
            bind_addr: env_or("AGWEATHER_BIND_ADDR", "127.0.0.1:8501"),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
