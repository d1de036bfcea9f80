//! Unit of work whose transactions fail when saving a user

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{
    InMemoryStore, InMemoryTransaction, RefreshTokenRepository, Transaction, UnitOfWork,
    UserRepository,
};

pub struct FailingUserSaveStore {
    pub inner: InMemoryStore,
}

pub struct FailingUserSaveTransaction {
    inner: InMemoryTransaction,
}

#[async_trait]
impl UnitOfWork for FailingUserSaveStore {
    type Tx = FailingUserSaveTransaction;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        Ok(FailingUserSaveTransaction {
            inner: self.inner.begin().await?,
        })
    }
}

#[async_trait]
impl UserRepository for FailingUserSaveTransaction {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, _user: User) -> Result<User, DomainError> {
        Err(DomainError::Storage {
            message: "connection reset".to_string(),
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for FailingUserSaveTransaction {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.inner.save_refresh_token(token).await
    }

    async fn find_refresh_token(&self, key: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.inner.find_refresh_token(key).await
    }

    async fn delete_refresh_token(&self, key: &str) -> Result<bool, DomainError> {
        self.inner.delete_refresh_token(key).await
    }
}

#[async_trait]
impl Transaction for FailingUserSaveTransaction {
    async fn commit(self) -> Result<(), DomainError> {
        self.inner.commit().await
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.inner.rollback().await
    }
}
