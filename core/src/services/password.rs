//! Password hashing

use crate::errors::DomainError;

/// Password hashing service
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password for storage
    fn encode(&self, raw_password: &str) -> Result<String, DomainError>;

    /// Check a raw password against a stored hash. Unparsable hashes never match.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

/// bcrypt-backed password encoder
#[derive(Debug, Clone)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, DomainError> {
        bcrypt::hash(raw_password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        bcrypt::verify(raw_password, encoded_password).unwrap_or(false)
    }
}
