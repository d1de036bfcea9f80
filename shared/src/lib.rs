//! Shared utilities and common types for the Carpool server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigLoadError, Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
