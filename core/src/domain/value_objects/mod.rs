//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod identity;

// Re-export commonly used types
pub use auth_response::UserCreateResponse;
pub use identity::{AuthenticatedIdentity, IdentityDetails};
