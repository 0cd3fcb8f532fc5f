//! Application configuration.
//!
//! Read from a TOML file; every key is optional.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "edu.db"
//!
//! [logging]
//! level = "info"
//! file = "edu.log"
//! ```

use std::path::{Path, PathBuf};

use edu_core::store::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or any `EnvFilter` directive.
    pub level: String,
    /// Append log records to this file as well as stdout.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line values over the file values.
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        connection_string: Option<String>,
        log_level: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.store.backend = backend;
        }
        if let Some(connection_string) = connection_string {
            self.store.connection_string = connection_string;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/edu.toml")).unwrap();

        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.store.backend, "memory");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();

        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.store, StoreConfig::default());
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let cfg = AppConfig::default().with_overrides(
            Some("sqlite".to_string()),
            Some("edu.db".to_string()),
            None,
        );

        assert_eq!(cfg.store.backend, "sqlite");
        assert_eq!(cfg.store.connection_string, "edu.db");
        assert_eq!(cfg.logging.level, "info");
    }
}
