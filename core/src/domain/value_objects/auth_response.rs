//! Token response value object returned after registration and login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::RefreshToken;

/// Tokens minted for a freshly registered or logged-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreateResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Refresh token record, as stored
    pub refresh_token: RefreshToken,
}

impl UserCreateResponse {
    pub fn new(access_token: String, refresh_token: RefreshToken) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
