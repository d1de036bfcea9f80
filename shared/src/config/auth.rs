//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Default access token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Default refresh token lifetime (14 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 14;

/// JWT authentication configuration
///
/// Mirrors the `jwt.*` keys: `jwt.secret`, `jwt.response.header`,
/// `jwt.token.prefix`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Raw secret material; base64-encoded once when the signing key is derived
    #[serde(default)]
    pub secret: String,

    /// Where the token travels in requests
    #[serde(default)]
    pub response: JwtResponseConfig,

    /// Expected token prefix
    #[serde(default)]
    pub token: JwtTokenConfig,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_expiry_minutes")]
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_token_expiry_days")]
    pub refresh_token_expiry_days: i64,
}

/// `jwt.response.*`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtResponseConfig {
    /// Header carrying the token (e.g. `Authorization`)
    #[serde(default = "default_header")]
    pub header: String,
}

/// `jwt.token.*`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtTokenConfig {
    /// Prefix in front of the token inside the header (e.g. `Bearer `)
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            response: JwtResponseConfig::default(),
            token: JwtTokenConfig::default(),
            access_token_expiry_minutes: default_access_token_expiry_minutes(),
            refresh_token_expiry_days: default_refresh_token_expiry_days(),
        }
    }
}

impl Default for JwtResponseConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
        }
    }
}

impl Default for JwtTokenConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the header name carrying the token
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.response.header = header.into();
        self
    }

    /// Set the token prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.token.prefix = prefix.into();
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }
}

fn default_header() -> String {
    String::from("Authorization")
}

fn default_prefix() -> String {
    String::from("Bearer ")
}

fn default_access_token_expiry_minutes() -> i64 {
    DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES
}

fn default_refresh_token_expiry_days() -> i64 {
    DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.refresh_token_expiry_days, 14);
        assert_eq!(config.response.header, "Authorization");
        assert_eq!(config.token.prefix, "Bearer ");
        assert!(config.secret.is_empty());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_header("X-Auth-Token")
            .with_prefix("Token ")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_days(1);

        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.response.header, "X-Auth-Token");
        assert_eq!(config.token.prefix, "Token ");
        assert_eq!(config.access_token_expiry_minutes, 5);
        assert_eq!(config.refresh_token_expiry_days, 1);
    }

    #[test]
    fn test_jwt_config_nested_keys_deserialize() {
        let json = serde_json::json!({
            "secret": "s3cr3t",
            "response": { "header": "Authorization" },
            "token": { "prefix": "Bearer " }
        });

        let config: JwtConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.response.header, "Authorization");
        assert_eq!(config.token.prefix, "Bearer ");
        assert_eq!(config.access_token_expiry_minutes, 30);
    }
}
