//! Error types for token handling, registration and configuration
//!
//! Every variant maps onto a stable error code from
//! [`carpool_shared::error_codes`] so the HTTP layer can pick a status code
//! without matching on message text.

use carpool_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("No identity registered for token subject: {username}")]
    UnknownIdentity { username: String },

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::MalformedToken => error_codes::MALFORMED_TOKEN,
            TokenError::InvalidSignature => error_codes::INVALID_SIGNATURE,
            TokenError::UnknownIdentity { .. } => error_codes::UNKNOWN_IDENTITY,
            TokenError::InvalidRefreshToken => error_codes::INVALID_REFRESH_TOKEN,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Registration and login errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("A user with email {email} is already registered")]
    DuplicateEmail { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User account is not active")]
    AccountInactive,
}

impl AuthError {
    /// Stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateEmail { .. } => error_codes::USER_DUPLICATE_EMAIL,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::AccountInactive => error_codes::ACCOUNT_INACTIVE,
        }
    }
}

/// Startup configuration errors. Fatal: the process cannot serve requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("jwt.secret is missing or empty")]
    MissingSecret,

    #[error("jwt.secret is too weak: derived key has {bits} bits, at least {required} required")]
    WeakSecret { bits: usize, required: usize },

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Request validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid value for field: {field}")]
    InvalidField { field: String },

    #[error("Invalid request: {fields:?}")]
    InvalidFields { fields: Vec<String> },
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ValidationError::InvalidFields { fields }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string());
        match err {
            ValidationError::InvalidField { field } => response.add_detail("fields", vec![field]),
            ValidationError::InvalidFields { fields } => response.add_detail("fields", fields),
        }
    }
}
