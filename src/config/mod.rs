//! Configuration loading and management for the Salary Ledger.
//!
//! This module loads the ledger configuration from a YAML file: listener
//! settings, the pay policy, role capability sets, user settings and session
//! token settings.
//!
//! # Example
//!
//! ```no_run
//! use salary_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ledger.yaml").unwrap();
//! println!("Pay policy: {:?}", config.config().payroll.pay_policy);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, ConfigLoader, DEFAULT_CONFIG_PATH, JWT_SECRET_ENV};
pub use types::{
    AccessPolicy, AuthConfig, BootstrapUser, LedgerConfig, PayrollConfig, ServerConfig,
    UsersConfig,
};
