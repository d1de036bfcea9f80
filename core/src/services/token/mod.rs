//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Signing key derivation from the configured secret
//! - Access token issuance and validation
//! - Refresh token issuance and validation
//! - Token extraction from request headers
//! - Resolving a token to an authenticated identity

mod config;
mod headers;
mod service;
mod signing_key;

#[cfg(test)]
mod tests;

pub use config::{TokenServiceConfig, MAX_TOKEN_LIFETIME_DAYS};
pub use headers::RequestHeaders;
pub use service::TokenService;
pub use signing_key::{SigningKey, MIN_KEY_BITS};
