//! Application state for the Salary Ledger API.
//!
//! This module wires the stores and services together into the state shared
//! by all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::services::{
    AttendanceBook, Directory, SalaryLedger, Settings, TokenIssuer, UserDirectory,
};
use crate::store::MemoryStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    directory: Directory,
    attendance: AttendanceBook,
    ledger: SalaryLedger,
    users: UserDirectory,
    tokens: Arc<TokenIssuer>,
    settings: Arc<Settings>,
}

impl AppState {
    /// Creates state backed by a fresh in-memory store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Creates state backed by the given store.
    pub fn with_store(config: ConfigLoader, store: Arc<MemoryStore>) -> Self {
        let ledger_config = config.config();
        let access = ledger_config.access.clone();
        let settings = Arc::new(Settings::new(ledger_config.payroll.standard_daily_hours));

        let directory = Directory::new(store.clone());
        let attendance = AttendanceBook::new(store.clone(), store.clone(), access.clone());
        let ledger = SalaryLedger::new(
            store.clone(),
            store.clone(),
            store.clone(),
            settings.clone(),
            access.clone(),
            ledger_config.payroll.pay_policy,
        );
        let users = UserDirectory::new(store, access, ledger_config.users.min_password_length);
        let tokens = Arc::new(TokenIssuer::from_config(&ledger_config.auth));

        Self {
            config: Arc::new(config),
            directory,
            attendance,
            ledger,
            users,
            tokens,
            settings,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Returns the attendance book.
    pub fn attendance(&self) -> &AttendanceBook {
        &self.attendance
    }

    /// Returns the salary ledger.
    pub fn ledger(&self) -> &SalaryLedger {
        &self.ledger
    }

    /// Returns the user directory.
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Returns the session token issuer.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Returns the runtime settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
