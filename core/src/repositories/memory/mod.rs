//! In-memory implementation of the user and refresh token stores.
//!
//! Used by the API binary in place of a database and by tests. Transactions
//! stage their writes locally and apply them under a single write lock on
//! commit, re-checking email uniqueness against the committed state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::token::RefreshTokenRepository;
use super::unit_of_work::{Transaction, UnitOfWork};
use super::user::UserRepository;


#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<Uuid, User>,
    refresh_tokens: HashMap<String, RefreshToken>,
}

impl StoreState {
    fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    fn check_unique_email(&self, user: &User) -> Result<(), DomainError> {
        match self.find_user_by_email(&user.email) {
            Some(existing) if existing.id != user.id => Err(AuthError::DuplicateEmail {
                email: user.email.clone(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Thread-safe in-memory store. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Number of stored refresh tokens
    pub async fn refresh_token_count(&self) -> usize {
        self.state.read().await.refresh_tokens.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.find_user_by_email(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        state.check_unique_email(&user)?;
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryStore {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut state = self.state.write().await;
        state.refresh_tokens.insert(token.key.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(&self, key: &str) -> Result<Option<RefreshToken>, DomainError> {
        let state = self.state.read().await;
        Ok(state.refresh_tokens.get(key).cloned())
    }

    async fn delete_refresh_token(&self, key: &str) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.refresh_tokens.remove(key).is_some())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        Ok(InMemoryTransaction {
            state: Arc::clone(&self.state),
            staged: Mutex::new(StagedWrites::default()),
        })
    }
}

#[derive(Debug, Default)]
struct StagedWrites {
    users: HashMap<Uuid, User>,
    saved_tokens: HashMap<String, RefreshToken>,
    deleted_tokens: HashSet<String>,
}

/// Transaction over an [`InMemoryStore`]
#[derive(Debug)]
pub struct InMemoryTransaction {
    state: Arc<RwLock<StoreState>>,
    staged: Mutex<StagedWrites>,
}

#[async_trait]
impl UserRepository for InMemoryTransaction {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let staged = self.staged.lock().await;
        if let Some(user) = staged.users.values().find(|u| u.email == email) {
            return Ok(Some(user.clone()));
        }
        let state = self.state.read().await;
        Ok(state
            .find_user_by_email(email)
            .filter(|u| !staged.users.contains_key(&u.id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let staged = self.staged.lock().await;
        if let Some(user) = staged.users.get(&id) {
            return Ok(Some(user.clone()));
        }
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut staged = self.staged.lock().await;
        if staged
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(AuthError::DuplicateEmail { email: user.email }.into());
        }
        staged.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryTransaction {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut staged = self.staged.lock().await;
        staged.deleted_tokens.remove(&token.key);
        staged.saved_tokens.insert(token.key.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(&self, key: &str) -> Result<Option<RefreshToken>, DomainError> {
        let staged = self.staged.lock().await;
        if staged.deleted_tokens.contains(key) {
            return Ok(None);
        }
        if let Some(token) = staged.saved_tokens.get(key) {
            return Ok(Some(token.clone()));
        }
        let state = self.state.read().await;
        Ok(state.refresh_tokens.get(key).cloned())
    }

    async fn delete_refresh_token(&self, key: &str) -> Result<bool, DomainError> {
        let existed = self.find_refresh_token(key).await?.is_some();
        let mut staged = self.staged.lock().await;
        staged.saved_tokens.remove(key);
        staged.deleted_tokens.insert(key.to_string());
        Ok(existed)
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> Result<(), DomainError> {
        let staged = self.staged.into_inner();
        let mut state = self.state.write().await;

        // Validate everything before touching the committed state
        for user in staged.users.values() {
            state.check_unique_email(user)?;
        }

        for (id, user) in staged.users {
            state.users.insert(id, user);
        }
        for key in staged.deleted_tokens {
            state.refresh_tokens.remove(&key);
        }
        for (key, token) in staged.saved_tokens {
            state.refresh_tokens.insert(key, token);
        }

        tracing::debug!("In-memory transaction committed");
        Ok(())
    }

    async fn rollback(self) -> Result<(), DomainError> {
        tracing::debug!("In-memory transaction rolled back");
        Ok(())
    }
}
