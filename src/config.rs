//! Configuration module for stash.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, StashError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin is allowed.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/stash.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Directory where uploaded files are stored.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum upload size in mebibytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    5
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl UploadsConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty means console-only logging.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Upload storage configuration.
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StashError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| StashError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `STASH_DATABASE_PATH`: Override the database file path
    /// - `STASH_PORT`: Override the listen port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("STASH_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }

        if let Ok(port) = std::env::var("STASH_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.uploads.max_upload_size_mb == 0 {
            return Err(StashError::Config(
                "uploads.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.uploads.storage_path.is_empty() {
            return Err(StashError::Config(
                "uploads.storage_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.database.path, "data/stash.db");

        assert_eq!(config.uploads.storage_path, "uploads");
        assert_eq!(config.uploads.max_upload_size_mb, 5);
        assert_eq!(config.uploads.max_upload_size_bytes(), 5 * 1024 * 1024);

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:5173"]

[database]
path = "custom/db.sqlite"

[uploads]
storage_path = "custom/uploads"
max_upload_size_mb = 10

[logging]
level = "debug"
file = "logs/stash.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.uploads.storage_path, "custom/uploads");
        assert_eq!(config.uploads.max_upload_size_mb, 10);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "logs/stash.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9090
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 9090);

        // Defaults for everything else
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/stash.db");
        assert_eq!(config.uploads.storage_path, "uploads");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.uploads.max_upload_size_mb, 5);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(StashError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(StashError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides() {
        let original_path = std::env::var("STASH_DATABASE_PATH").ok();
        let original_port = std::env::var("STASH_PORT").ok();

        std::env::set_var("STASH_DATABASE_PATH", "env/stash.db");
        std::env::set_var("STASH_PORT", "9999");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.database.path, "env/stash.db");
        assert_eq!(config.server.port, 9999);

        match original_path {
            Some(val) => std::env::set_var("STASH_DATABASE_PATH", val),
            None => std::env::remove_var("STASH_DATABASE_PATH"),
        }
        match original_port {
            Some(val) => std::env::set_var("STASH_PORT", val),
            None => std::env::remove_var("STASH_PORT"),
        }
    }

    #[test]
    fn test_validate_zero_max_upload_size() {
        let mut config = Config::default();
        config.uploads.max_upload_size_mb = 0;

        let result = config.validate();
        assert!(result.is_err());
        if let Err(StashError::Config(msg)) = result {
            assert!(msg.contains("max_upload_size_mb"));
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }
}
