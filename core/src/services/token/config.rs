//! Configuration for the token service

use carpool_shared::config::JwtConfig;
use chrono::Duration;

use crate::errors::ConfigurationError;

/// Longest accepted lifetime for either token kind (ten years)
pub const MAX_TOKEN_LIFETIME_DAYS: i64 = 3650;

const ACCESS_LIFETIME_KEY: &str = "jwt.access_token_expiry_minutes";
const REFRESH_LIFETIME_KEY: &str = "jwt.refresh_token_expiry_days";

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Header carrying the token
    pub header: String,
    /// Prefix stripped from the header value
    pub prefix: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
    /// Refresh token lifetime
    pub refresh_token_lifetime: Duration,
}

impl TokenServiceConfig {
    /// Rejects settings the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.header.trim().is_empty() {
            return Err(ConfigurationError::InvalidSetting {
                key: "jwt.response.header".to_string(),
                reason: "header name must not be empty".to_string(),
            });
        }
        if self.prefix.is_empty() {
            return Err(ConfigurationError::InvalidSetting {
                key: "jwt.token.prefix".to_string(),
                reason: "token prefix must not be empty".to_string(),
            });
        }
        check_lifetime(ACCESS_LIFETIME_KEY, self.access_token_lifetime)?;
        check_lifetime(REFRESH_LIFETIME_KEY, self.refresh_token_lifetime)?;
        Ok(())
    }
}

fn check_lifetime(key: &str, lifetime: Duration) -> Result<(), ConfigurationError> {
    if lifetime <= Duration::zero() {
        return Err(invalid_lifetime(key, "must be positive".to_string()));
    }
    if lifetime > Duration::days(MAX_TOKEN_LIFETIME_DAYS) {
        return Err(invalid_lifetime(
            key,
            format!("must not exceed {} days", MAX_TOKEN_LIFETIME_DAYS),
        ));
    }
    Ok(())
}

fn invalid_lifetime(key: &str, reason: String) -> ConfigurationError {
    ConfigurationError::InvalidSetting {
        key: key.to_string(),
        reason,
    }
}

/// Converts and validates the `jwt.*` settings
impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigurationError;

    fn try_from(jwt: &JwtConfig) -> Result<Self, Self::Error> {
        let access_token_lifetime = Duration::try_minutes(jwt.access_token_expiry_minutes)
            .ok_or_else(|| invalid_lifetime(ACCESS_LIFETIME_KEY, "out of range".to_string()))?;
        let refresh_token_lifetime = Duration::try_days(jwt.refresh_token_expiry_days)
            .ok_or_else(|| invalid_lifetime(REFRESH_LIFETIME_KEY, "out of range".to_string()))?;

        let config = Self {
            header: jwt.response.header.clone(),
            prefix: jwt.token.prefix.clone(),
            access_token_lifetime,
            refresh_token_lifetime,
        };
        config.validate()?;
        Ok(config)
    }
}
