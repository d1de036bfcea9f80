//! Business services containing domain logic and use cases.

pub mod password;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use password::{BcryptPasswordEncoder, PasswordEncoder};
pub use token::{RequestHeaders, SigningKey, TokenService, TokenServiceConfig};
pub use user::{LoginRequest, UserCreateRequest, UserService};
