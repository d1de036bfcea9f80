//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Access token expiration time (30 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Refresh token expiration time (14 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 14;

/// Claims structure for JWT payload
///
/// Timestamps are seconds since the Unix epoch, per the registered `iat`/`exp`
/// claim conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username for access tokens, a random UUID for refresh tokens
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims issued at `issued_at` and valid for `lifetime`
    ///
    /// Fails with `TokenError::TokenGenerationFailed` when the expiry falls
    /// outside the representable date range.
    pub fn new(
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Creates new claims for an access token bound to `username`
    pub fn new_access_token(
        username: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        Self::new(username, issued_at, lifetime)
    }

    /// Creates new claims for a refresh token.
    ///
    /// The subject is a fresh random UUID so the signed value alone never
    /// reveals who owns it.
    pub fn new_refresh_token(
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        Self::new(Uuid::new_v4().to_string(), issued_at, lifetime)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Token lifetime encoded in the claims
    pub fn lifetime(&self) -> Duration {
        Duration::seconds(self.exp - self.iat)
    }
}

/// Refresh token record handed to the refresh-token store
///
/// `key` is the signed opaque token, `value` the id of the user owning it.
/// The mapping from key to user lives only in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Signed refresh token string
    pub key: String,

    /// Owning user's id
    pub value: Uuid,
}

impl RefreshToken {
    /// Creates a new refresh token record
    pub fn new(key: String, value: Uuid) -> Self {
        Self { key, value }
    }
}
