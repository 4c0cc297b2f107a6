//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., `default_repo` must be
//! a valid `owner/name` identifier).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::RepositoryRef;

/// Default simulated generation delay in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Default generation timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration.
///
/// # Example
///
/// ```toml
/// default_repo = "octocat/hello-world"
///
/// [generator]
/// delay_ms = 2000
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repository used when none is given on the command line
    pub default_repo: Option<String>,

    /// Generation settings
    pub generator: Option<GeneratorConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repo) = &self.default_repo {
            RepositoryRef::parse(repo)
                .map_err(|e| ConfigError::InvalidValue(format!("default_repo: {}", e)))?;
        }

        if let Some(generator) = &self.generator {
            generator.validate()?;
        }

        Ok(())
    }
}

/// Generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Simulated delay of the stub source
    pub delay_ms: Option<u64>,

    /// Upper bound on a single generation call
    pub timeout_secs: Option<u64>,
}

impl GeneratorConfig {
    /// Validate the generator settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "generator.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
