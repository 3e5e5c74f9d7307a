//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the ledger
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};

use super::types::{AccessPolicy, LedgerConfig};

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "LEDGER_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./config/ledger.yaml";

/// Environment variable overriding `auth.jwt_secret`.
pub const JWT_SECRET_ENV: &str = "LEDGER_JWT_SECRET";

/// Shortest accepted configured token secret, in bytes.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Loads and provides access to the ledger configuration.
///
/// # File Layout
///
/// ```text
/// server:   { host, port }
/// payroll:  { pay_policy, standard_daily_hours }
/// access:   { override_roles, privileged_roles }
/// users:    { min_password_length, bootstrap }
/// auth:     { jwt_secret, token_ttl_minutes }
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ledger.yaml").unwrap();
/// println!("Listening on port {}", loader.config().server.port);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content).map_err(|err| match err {
            LedgerError::ConfigParseError { message, .. } => LedgerError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Loads the file named by `LEDGER_CONFIG`, or the default path.
    ///
    /// A non-empty `LEDGER_JWT_SECRET` replaces the file's token secret.
    pub fn from_env() -> LedgerResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let loader = Self::load(path)?;
        match std::env::var(JWT_SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => loader.with_jwt_secret(secret),
            _ => Ok(loader),
        }
    }

    /// Replaces the token secret, re-validating the result.
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> LedgerResult<Self> {
        self.config.auth.jwt_secret = secret.into();
        Self::validate(&self.config)?;
        Ok(self)
    }

    /// Parses configuration from a YAML string.
    pub fn parse(content: &str) -> LedgerResult<Self> {
        let config: LedgerConfig =
            serde_yaml::from_str(content).map_err(|e| LedgerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn validate(config: &LedgerConfig) -> LedgerResult<()> {
        let hours = config.payroll.standard_daily_hours;
        if hours <= rust_decimal::Decimal::ZERO || hours > rust_decimal::Decimal::new(24, 0) {
            return Err(LedgerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: format!("payroll.standard_daily_hours must be in (0, 24], got {hours}"),
            });
        }
        if config.access.override_roles.is_empty() {
            return Err(LedgerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: "access.override_roles must name at least one role".to_string(),
            });
        }
        let secret_len = config.auth.jwt_secret.len();
        if secret_len > 0 && secret_len < MIN_JWT_SECRET_LEN {
            return Err(LedgerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: format!(
                    "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes, got {secret_len}"
                ),
            });
        }
        if config.auth.token_ttl_minutes <= 0 {
            return Err(LedgerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: format!(
                    "auth.token_ttl_minutes must be positive, got {}",
                    config.auth.token_ttl_minutes
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the role capability sets.
    pub fn access(&self) -> &AccessPolicy {
        &self.config.access
    }
}

impl From<LedgerConfig> for ConfigLoader {
    fn from(config: LedgerConfig) -> Self {
        Self { config }
    }
}
