//! Identity lookup used to turn a token subject into an authenticated identity.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::value_objects::IdentityDetails;
use crate::errors::DomainError;

use super::user::UserRepository;

/// Resolves a username to the identity details and authorities behind it
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// # Returns
    /// * `Ok(Some(IdentityDetails))` - Identity found
    /// * `Ok(None)` - Username unknown
    /// * `Err(DomainError)` - Lookup failed
    async fn load_by_username(&self, username: &str)
        -> Result<Option<IdentityDetails>, DomainError>;
}

#[async_trait]
impl<T: IdentityLookup + ?Sized> IdentityLookup for Arc<T> {
    async fn load_by_username(
        &self,
        username: &str,
    ) -> Result<Option<IdentityDetails>, DomainError> {
        (**self).load_by_username(username).await
    }
}

/// Identity lookup backed by a user repository; usernames are emails
pub struct UserIdentityLookup<R> {
    users: R,
}

impl<R: UserRepository> UserIdentityLookup<R> {
    pub fn new(users: R) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R: UserRepository> IdentityLookup for UserIdentityLookup<R> {
    async fn load_by_username(
        &self,
        username: &str,
    ) -> Result<Option<IdentityDetails>, DomainError> {
        let user = self.users.find_by_email(username).await?;
        Ok(user.as_ref().map(IdentityDetails::from))
    }
}
