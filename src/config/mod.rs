//! Configuration management for the hospital directory
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ServerConfig;
use crate::client::{ClientConfig, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// API client configuration
    pub client: ClientSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// Keep everything in process memory instead
    pub in_memory: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("data/hospitals.db"),
            in_memory: false,
        }
    }
}

/// Settings for the command-line API client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// API server URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "pretty", "json"];

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HOSPITAL_BIND_ADDRESS") {
            config.server.bind_address = addr
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid HOSPITAL_BIND_ADDRESS: {addr}"))?;
        }

        if let Ok(port) = std::env::var("PORT") {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {port}"))?;
            config.server.bind_address.set_port(port);
        }

        if let Ok(path) = std::env::var("HOSPITAL_DB_PATH") {
            config.database.sqlite_path = PathBuf::from(path);
        }

        if let Ok(url) = std::env::var("HOSPITAL_API_URL") {
            config.client.base_url = url;
        }

        if let Some(secs) = std::env::var("HOSPITAL_API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.client.timeout_secs = secs;
        }

        if let Ok(level) = std::env::var("HOSPITAL_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("HOSPITAL_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.server
            .validate()
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        if !self.database.in_memory && self.database.sqlite_path.as_os_str().is_empty() {
            anyhow::bail!("sqlite_path must not be empty");
        }

        if !self.client.base_url.starts_with("http://")
            && !self.client.base_url.starts_with("https://")
        {
            anyhow::bail!("client base_url must be an http(s) URL");
        }

        if self.client.timeout_secs == 0 {
            anyhow::bail!("client timeout_secs must be greater than 0");
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("Unknown log level: {}", self.logging.level);
        }

        if !LOG_FORMATS.contains(&self.logging.format.to_lowercase().as_str()) {
            anyhow::bail!("Unknown log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Get client request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.client.timeout_secs)
    }
}
