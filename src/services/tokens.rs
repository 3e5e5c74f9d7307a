//! Signed session tokens.
//!
//! Login hands out an HS256 JWT carrying the user id and role. Every other
//! route reads the caller's identity back from that token, so the role used
//! for authorization is the one stored on the account, never one the client
//! chose.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Session, UserId};

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user.
    pub sub: UserId,
    /// The user's role at login.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// A freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenIssuer {
    /// Creates an issuer signing with `secret`.
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_minutes,
        }
    }

    /// Creates an issuer from configuration, generating a random secret when
    /// none is configured.
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.jwt_secret.is_empty() {
            let secret = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
            Self::new(secret.as_bytes(), config.token_ttl_minutes)
        } else {
            Self::new(config.jwt_secret.as_bytes(), config.token_ttl_minutes)
        }
    }

    /// Signs a token for a logged-in user.
    pub fn issue(&self, session: &Session) -> LedgerResult<IssuedToken> {
        let now = Utc::now().timestamp();
        let expires_in = self.ttl_minutes * 60;
        let claims = Claims {
            sub: session.user_id,
            role: session.role.clone(),
            exp: now + expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            LedgerError::Internal {
                message: format!("token signing failed: {e}"),
            }
        })?;
        Ok(IssuedToken { token, expires_in })
    }

    /// Checks the signature and expiry of a token and returns its claims.
    pub fn verify(&self, token: &str) -> LedgerResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| LedgerError::unauthenticated("Invalid or expired token"))
    }
}
