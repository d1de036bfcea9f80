//! Explicit transaction scope spanning user and refresh token writes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainError;

use super::token::RefreshTokenRepository;
use super::user::UserRepository;

/// A unit of work over the user and refresh token stores.
///
/// Reads inside the transaction see its own uncommitted writes. Nothing is
/// visible outside until [`commit`](Transaction::commit) succeeds; a failed
/// commit or a [`rollback`](Transaction::rollback) leaves the stores unchanged.
#[async_trait]
pub trait Transaction: UserRepository + RefreshTokenRepository + Sized {
    /// Apply all staged writes atomically
    async fn commit(self) -> Result<(), DomainError>;

    /// Discard all staged writes
    async fn rollback(self) -> Result<(), DomainError>;
}

/// Factory for transactions
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Tx: Transaction;

    /// Open a new transaction
    async fn begin(&self) -> Result<Self::Tx, DomainError>;
}

#[async_trait]
impl<T: UnitOfWork + ?Sized> UnitOfWork for Arc<T> {
    type Tx = T::Tx;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        (**self).begin().await
    }
}
