//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$DEVCHANGELOG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/devchangelog/config.toml`
//! 3. `~/.devchangelog/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use devchangelog::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Delay: {:?}", config.generator_delay());
//! println!("Timeout: {:?}", config.generator_timeout());
//! ```

pub mod schema;

pub use schema::{FileConfig, GeneratorConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::types::RepositoryRef;
use schema::{DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_SECS};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DEVCHANGELOG_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Effective configuration.
///
/// Accessors apply defaults for anything the file leaves unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Path the file was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. A missing file is not an error (defaults are used).
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Config {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Build a configuration from already-parsed contents.
    pub fn from_file(file: FileConfig) -> Config {
        Config { file, path: None }
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("devchangelog/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".devchangelog/config.toml"))
            .filter(|path| path.exists())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Repository to use when none is given.
    ///
    /// Validated at load time, so parsing cannot fail here.
    pub fn default_repo(&self) -> Option<RepositoryRef> {
        self.file
            .default_repo
            .as_deref()
            .and_then(|r| RepositoryRef::parse(r).ok())
    }

    /// Simulated delay of the stub source.
    ///
    /// Defaults to 2 seconds.
    pub fn generator_delay(&self) -> Duration {
        let ms = self
            .file
            .generator
            .as_ref()
            .and_then(|g| g.delay_ms)
            .unwrap_or(DEFAULT_DELAY_MS);
        Duration::from_millis(ms)
    }

    /// Timeout applied to each generation call.
    ///
    /// Defaults to 30 seconds.
    pub fn generator_timeout(&self) -> Duration {
        let secs = self
            .file
            .generator
            .as_ref()
            .and_then(|g| g.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();

        assert!(config.default_repo().is_none());
        assert_eq!(config.generator_delay(), Duration::from_millis(2000));
        assert_eq!(config.generator_timeout(), Duration::from_secs(30));
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            default_repo = "octocat/hello-world"

            [generator]
            delay_ms = 0
            timeout_secs = 3
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(
            config.default_repo(),
            Some(RepositoryRef::parse("octocat/hello-world").unwrap())
        );
        assert_eq!(config.generator_delay(), Duration::ZERO);
        assert_eq!(config.generator_timeout(), Duration::from_secs(3));
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn parse_error_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "default_repo = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "default_repo = \"a/b/c\"").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
