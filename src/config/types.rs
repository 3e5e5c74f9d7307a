//! Configuration types for the Salary Ledger.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has
//! defaults so a partial file is accepted.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::PayPolicy;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Payroll settings used when generating salary records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// How worked hours map to a payable amount.
    pub pay_policy: PayPolicy,
    /// Standard working hours per calendar day, the initial value of the
    /// runtime setting.
    pub standard_daily_hours: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            pay_policy: PayPolicy::HoursProportional,
            standard_daily_hours: Decimal::new(16, 0),
        }
    }
}

/// Role capability sets.
///
/// Roles are compared exactly; the check is evaluated server-side for every
/// request that carries a role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    /// Roles allowed to edit a locked salary record.
    pub override_roles: Vec<String>,
    /// Roles allowed to record attendance with a manual date or time.
    pub privileged_roles: Vec<String>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            override_roles: vec!["head".to_string()],
            privileged_roles: vec!["admin".to_string(), "head".to_string()],
        }
    }
}

impl AccessPolicy {
    /// Returns true if the role may edit a locked salary record.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_ledger::config::AccessPolicy;
    ///
    /// let access = AccessPolicy::default();
    /// assert!(access.can_override_lock("head"));
    /// assert!(!access.can_override_lock("admin"));
    /// ```
    pub fn can_override_lock(&self, role: &str) -> bool {
        self.override_roles.iter().any(|r| r == role)
    }

    /// Returns true if the role may set a manual attendance date or time.
    pub fn can_set_manual_time(&self, role: &str) -> bool {
        self.is_privileged(role)
    }

    /// Returns true if the role may administer employees, users and settings.
    pub fn is_privileged(&self, role: &str) -> bool {
        self.privileged_roles.iter().any(|r| r == role)
    }
}

/// Session token settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens. When empty, a random secret
    /// is generated at startup and tokens do not survive a restart.
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: 60,
        }
    }
}

/// An account created at startup when no users exist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BootstrapUser {
    /// Login name.
    pub username: String,
    /// Initial plaintext password; hashed before storage.
    pub password: String,
    /// Role of the account.
    pub role: String,
}

/// System user settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Minimum accepted password length.
    pub min_password_length: usize,
    /// Account seeded on startup, if any.
    pub bootstrap: Option<BootstrapUser>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            bootstrap: None,
        }
    }
}

/// The complete ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Payroll settings.
    pub payroll: PayrollConfig,
    /// Role capability sets.
    pub access: AccessPolicy,
    /// System user settings.
    pub users: UsersConfig,
    /// Session token settings.
    pub auth: AuthConfig,
}
