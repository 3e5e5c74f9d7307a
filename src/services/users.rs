//! System user management and login.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AccessPolicy, BootstrapUser};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Session, User, UserId};
use crate::store::UserStore;

use super::password::{hash_password, verify_password};

/// Hash checked when the username is unknown, so a failed login costs the
/// same whether or not the account exists.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$R9tv9eck1b55buvDzdxbIQ$esG2VO1WIBzFcBPPfUAZUBhUT12ku8cfGvBCjtZnrwU";

/// Manages accounts and checks credentials.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    access: AccessPolicy,
    min_password_length: usize,
}

impl UserDirectory {
    /// Creates a user directory over the given store.
    pub fn new(store: Arc<dyn UserStore>, access: AccessPolicy, min_password_length: usize) -> Self {
        Self {
            store,
            access,
            min_password_length,
        }
    }

    fn check_password(&self, password: &str) -> LedgerResult<()> {
        if password.chars().count() < self.min_password_length {
            return Err(LedgerError::validation(
                "password",
                format!(
                    "password must be at least {} characters long",
                    self.min_password_length
                ),
            ));
        }
        Ok(())
    }

    /// Creates the configured account if no users exist yet.
    pub fn bootstrap(&self, account: &BootstrapUser) -> LedgerResult<Option<User>> {
        if !self.store.list_users().is_empty() {
            return Ok(None);
        }
        let user = self.add_user(&account.username, &account.password, &account.role)?;
        info!(user_id = user.id, username = %user.username, "Bootstrap user created");
        Ok(Some(user))
    }

    /// Adds an account.
    pub fn add_user(&self, username: &str, password: &str, role: &str) -> LedgerResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LedgerError::validation("username", "username is required"));
        }
        if role.trim().is_empty() {
            return Err(LedgerError::validation("role", "role is required"));
        }
        self.check_password(password)?;

        let user = self
            .store
            .insert_user(username, hash_password(password)?, role.trim())?;
        info!(user_id = user.id, username = %user.username, role = %user.role, "User added");
        Ok(user)
    }

    /// Checks credentials and returns the caller's role.
    pub fn login(&self, username: &str, password: &str) -> LedgerResult<Session> {
        let Some(user) = self.store.find_user(username) else {
            verify_password(password, DUMMY_HASH)?;
            warn!(username, "Login failed: unknown user");
            return Err(LedgerError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash)? {
            warn!(username, "Login failed: wrong password");
            return Err(LedgerError::InvalidCredentials);
        }
        info!(user_id = user.id, role = %user.role, "Login succeeded");
        Ok(Session {
            user_id: user.id,
            role: user.role,
        })
    }

    /// Lists accounts ordered by identifier.
    pub fn list(&self) -> Vec<User> {
        self.store.list_users()
    }

    /// Replaces an account's password.
    ///
    /// Users may change their own password; privileged roles may change any.
    pub fn update_password(
        &self,
        requester: &Session,
        user_id: UserId,
        password: &str,
    ) -> LedgerResult<User> {
        if requester.user_id != user_id && !self.access.is_privileged(&requester.role) {
            return Err(LedgerError::unauthorized(
                &requester.role,
                "only privileged roles can change another user's password",
            ));
        }
        self.check_password(password)?;
        let hash = hash_password(password)?;
        let user = self.store.modify_user(user_id, &mut |user| {
            user.password_hash = hash.clone();
            Ok(())
        })?;
        info!(user_id, "Password updated");
        Ok(user)
    }

    /// Removes an account.
    ///
    /// A user cannot remove their own account, and the last account holding
    /// an override role cannot be removed.
    pub fn delete_user(&self, user_id: UserId, requester_id: UserId) -> LedgerResult<User> {
        if requester_id == user_id {
            return Err(LedgerError::conflict(
                "you cannot delete your own account while logged in",
            ));
        }
        let access = &self.access;
        let removed = self.store.remove_user(user_id, &mut |target, all| {
            if access.can_override_lock(&target.role) {
                let holders = all
                    .iter()
                    .filter(|u| access.can_override_lock(&u.role))
                    .count();
                if holders <= 1 {
                    return Err(LedgerError::conflict(format!(
                        "cannot delete the only remaining '{}' account",
                        target.role
                    )));
                }
            }
            Ok(())
        })?;
        info!(user_id, username = %removed.username, "User deleted");
        Ok(removed)
    }
}
