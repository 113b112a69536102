//! HTTP Server Configuration
//!
//! Listening address, data file location, schema/update policy and CORS.
//!
//! Precedence, lowest first: built-in defaults, JSON config file,
//! environment (`PORT`, `BOOKSHELF_DATA_FILE`), command-line flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::books::{SchemaVariant, UpdatePolicy};
use crate::observability::Severity;

/// Environment variable selecting the listening port
pub const PORT_ENV: &str = "PORT";
/// Environment variable selecting the data file
pub const DATA_FILE_ENV: &str = "BOOKSHELF_DATA_FILE";

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the collection (default: "./data/books.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Required field set (default: classic)
    #[serde(default)]
    pub schema: SchemaVariant,

    /// PUT semantics (default: strict_replace)
    #[serde(default)]
    pub update_policy: UpdatePolicy,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Lowest severity written to the log (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/books.json")
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            schema: SchemaVariant::default(),
            update_policy: UpdatePolicy::default(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let config: ServerConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV).filter(|v| !v.trim().is_empty()) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(PORT_ENV, format!("'{}' is not a port", port)))?;
        }

        if let Some(data_file) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(data_file);
        }

        self.validate()
    }

    /// Reject values no server can start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "must be > 0"));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }

        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::invalid("data_file", "must not be empty"));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
