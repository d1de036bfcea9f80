//! # Carpool Core
//!
//! Core business logic for the carpool backend: JWT access and refresh
//! tokens, user registration and login, and the repository interfaces the
//! services run against.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthenticatedIdentity, Claims, IdentityDetails, RefreshToken, Role, Status, User,
    UserCreateResponse,
};
pub use errors::{
    AuthError, ConfigurationError, DomainError, DomainResult, TokenError, ValidationError,
};
pub use repositories::{
    IdentityLookup, InMemoryStore, InMemoryTransaction, RefreshTokenRepository, Transaction,
    UnitOfWork, UserIdentityLookup, UserRepository,
};
pub use services::{
    BcryptPasswordEncoder, LoginRequest, PasswordEncoder, RequestHeaders, SigningKey,
    TokenService, TokenServiceConfig, UserCreateRequest, UserService,
};
