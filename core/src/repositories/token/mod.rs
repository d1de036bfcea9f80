//! Refresh token repository trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh token records
///
/// The store exclusively owns persisted refresh tokens; the token service only
/// produces and validates them. Records are keyed by their signed `key`.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Save a refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError)` - Save failed
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token record by its signed key
    async fn find_refresh_token(&self, key: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete a refresh token record
    ///
    /// # Returns
    /// * `Ok(true)` - Record deleted
    /// * `Ok(false)` - No record with that key
    async fn delete_refresh_token(&self, key: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: RefreshTokenRepository + ?Sized> RefreshTokenRepository for Arc<T> {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        (**self).save_refresh_token(token).await
    }

    async fn find_refresh_token(&self, key: &str) -> Result<Option<RefreshToken>, DomainError> {
        (**self).find_refresh_token(key).await
    }

    async fn delete_refresh_token(&self, key: &str) -> Result<bool, DomainError> {
        (**self).delete_refresh_token(key).await
    }
}
