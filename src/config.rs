//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/civic-issues/config.toml`,
//! overridable with `CIVIC_CONFIG` or `--config`). Every section and key is
//! optional; missing values take their defaults. `DATABASE_URL`, when set,
//! overrides `database.url`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;
use crate::shared::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CIVIC_CONFIG";
/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public URL used in `Location` and `Link` headers.
    /// Defaults to `http://localhost:<port>`.
    pub base_url: Option<String>,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: None,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `civic_issues=debug,tower_http=info`.
    /// `RUST_LOG` takes precedence.
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                config.database.url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, log_level: Option<&str>, port: Option<u16>) {
        if let Some(level) = log_level {
            self.logging.level = level.to_string();
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check values that would otherwise fail at startup or per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must be set".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        let PaginationConfig {
            default_page_size,
            max_page_size,
        } = self.pagination;
        if max_page_size == 0 || default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::Invalid(format!(
                "pagination sizes must satisfy 1 <= default_page_size ({}) <= max_page_size ({})",
                default_page_size, max_page_size
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be `text` or `json`, got `{}`",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// `$CIVIC_CONFIG`, or `config.toml` under the user config directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("civic-issues")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pagination.default_page_size, 100);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080
            base_url = "https://issues.example.org/"

            [database]
            url = "sqlite://./test.db?mode=rwc"

            [pagination]
            default_page_size = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.base_url(), "https://issues.example.org");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.pagination.max_page_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_defaults_to_localhost_and_port() {
        let config = AppConfig::default();
        assert_eq!(config.server.base_url(), "http://localhost:3000");
    }

    #[test]
    fn rejects_inconsistent_page_sizes() {
        let mut config = AppConfig::default();
        config.pagination.default_page_size = 200;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("civic-issues-does-not-exist.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn overrides_replace_level_and_port() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("debug"), Some(8081));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.base_url(), "http://localhost:8081");

        config.apply_overrides(None, None);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("civic-issues-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
