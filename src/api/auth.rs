//! Bearer token extractors.
//!
//! [`AuthUser`] accepts any valid session token. [`RequirePrivileged`] also
//! requires one of the configured privileged roles and rejects others with
//! 403.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::error::LedgerError;
use crate::models::{Session, UserId};

use super::response::ApiErrorResponse;
use super::state::AppState;

/// Identity taken from a verified `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// The authenticated user.
    pub user_id: UserId,
    /// The role stored in the token at login.
    pub role: String,
}

impl AuthUser {
    /// The caller as a service-level session.
    pub fn session(&self) -> Session {
        Session {
            user_id: self.user_id,
            role: self.role.clone(),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| LedgerError::unauthenticated("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            LedgerError::unauthenticated("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = state.tokens().verify(token).inspect_err(|err| {
            warn!(uri = %parts.uri, error = %err, "Token rejected");
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// An [`AuthUser`] whose role is in `access.privileged_roles`.
#[derive(Debug, Clone)]
pub struct RequirePrivileged(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for RequirePrivileged {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !state.config().access().is_privileged(&user.role) {
            warn!(uri = %parts.uri, user_id = user.user_id, role = %user.role, "Privileged route refused");
            return Err(LedgerError::unauthorized(&user.role, "a privileged role is required").into());
        }
        Ok(RequirePrivileged(user))
    }
}
