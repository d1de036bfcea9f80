//! Maps domain errors onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use carpool_core::errors::{AuthError, DomainError, TokenError};
use carpool_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Error returned by handlers and the authentication filter
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Authentication required")]
    Unauthorized,
}

impl ApiError {
    /// Builds the JSON body for this error
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Unauthorized => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, self.to_string())
            }
            ApiError::Domain(DomainError::Token(err)) => err.clone().into(),
            ApiError::Domain(DomainError::Auth(err)) => err.clone().into(),
            ApiError::Domain(DomainError::Validation(err)) => err.clone().into(),
            ApiError::Domain(DomainError::Configuration(_)) => ErrorResponse::new(
                error_codes::CONFIGURATION_ERROR,
                "Server is misconfigured",
            ),
            ApiError::Domain(DomainError::Storage { .. } | DomainError::Internal { .. }) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Domain(err) => domain_status(err),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(self.to_error_response())
    }
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(err) => match err {
            TokenError::TokenExpired
            | TokenError::MalformedToken
            | TokenError::InvalidSignature
            | TokenError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            TokenError::UnknownIdentity { .. } => StatusCode::FORBIDDEN,
            TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Auth(err) => match err {
            AuthError::DuplicateEmail { .. } => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::AccountInactive => StatusCode::FORBIDDEN,
        },
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Configuration(_)
        | DomainError::Storage { .. }
        | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
