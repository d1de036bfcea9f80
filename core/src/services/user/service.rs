//! User registration and login

use std::sync::Arc;

use once_cell::sync::OnceCell;
use validator::Validate;

use crate::domain::entities::user::User;
use crate::domain::value_objects::UserCreateResponse;
use crate::errors::{AuthError, DomainResult, TokenError, ValidationError};
use crate::repositories::{IdentityLookup, RefreshTokenRepository, Transaction, UnitOfWork, UserRepository};
use crate::services::password::PasswordEncoder;
use crate::services::token::TokenService;

use super::dto::{LoginRequest, UserCreateRequest};

/// Raw password hashed once to give unknown-email logins a hash to check against
const UNKNOWN_USER_PASSWORD: &str = "carpool-unknown-user-password";

/// Service for registering users and issuing their tokens
pub struct UserService<W, L, P>
where
    W: UnitOfWork,
    L: IdentityLookup,
    P: PasswordEncoder,
{
    /// Transaction scope over the user and refresh token stores
    unit_of_work: W,
    /// Token service for JWT management
    token_service: Arc<TokenService<L>>,
    /// Password hashing
    password_encoder: P,
    /// Hash checked when the email is unknown, so both login failures cost a hash
    unknown_user_hash: OnceCell<String>,
}

impl<W, L, P> UserService<W, L, P>
where
    W: UnitOfWork,
    L: IdentityLookup,
    P: PasswordEncoder,
{
    pub fn new(unit_of_work: W, token_service: Arc<TokenService<L>>, password_encoder: P) -> Self {
        Self {
            unit_of_work,
            token_service,
            password_encoder,
            unknown_user_hash: OnceCell::new(),
        }
    }

    /// Register a new user
    ///
    /// The duplicate check, user creation and refresh token save run in one
    /// transaction; any failure rolls back every write.
    ///
    /// # Returns
    ///
    /// * `Ok(UserCreateResponse)` - access token and the stored refresh token
    /// * `Err(DomainError)` - invalid request, duplicate email, or storage failure
    pub async fn join_user(&self, request: UserCreateRequest) -> DomainResult<UserCreateResponse> {
        request.validate().map_err(ValidationError::from)?;

        let tx = self.unit_of_work.begin().await?;
        let result = self.register(&tx, &request).await;
        let response = Self::finish(tx, result).await?;

        tracing::info!(user_id = %response.refresh_token.value, "User registered");
        Ok(response)
    }

    /// Authenticate with email and password and issue a fresh token pair
    pub async fn login(&self, request: LoginRequest) -> DomainResult<UserCreateResponse> {
        let tx = self.unit_of_work.begin().await?;
        let result = self.authenticate(&tx, &request).await;
        Self::finish(tx, result).await
    }

    /// Mint a new access token from a stored refresh token
    ///
    /// # Errors
    ///
    /// * Token errors when the refresh key is malformed, forged or expired
    /// * `TokenError::InvalidRefreshToken` - the key is not in the store
    /// * `AuthError::UserNotFound` / `AuthError::AccountInactive` - owner gone or disabled
    pub async fn reissue_access_token(&self, refresh_key: &str) -> DomainResult<String> {
        self.token_service.validate_refresh_token(refresh_key)?;

        let tx = self.unit_of_work.begin().await?;
        let result = self.reissue(&tx, refresh_key).await;
        Self::finish(tx, result).await
    }

    async fn register(
        &self,
        tx: &W::Tx,
        request: &UserCreateRequest,
    ) -> DomainResult<UserCreateResponse> {
        self.validate_duplicate_user(tx, &request.email).await?;
        let user = self.create_user(request)?;

        let access_token = self.token_service.create_access_token(&user)?;
        let refresh_token = self.token_service.create_refresh_token(&user)?;

        tx.save_refresh_token(refresh_token.clone()).await?;
        tx.save(user).await?;

        Ok(UserCreateResponse::new(access_token, refresh_token))
    }

    async fn authenticate(
        &self,
        tx: &W::Tx,
        request: &LoginRequest,
    ) -> DomainResult<UserCreateResponse> {
        let Some(user) = tx.find_by_email(&request.email).await? else {
            self.match_unknown_user(&request.password);
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.password_encoder.matches(&request.password, &user.password) {
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active() {
            return Err(AuthError::AccountInactive.into());
        }

        let access_token = self.token_service.create_access_token(&user)?;
        let refresh_token = self.token_service.create_refresh_token(&user)?;
        tx.save_refresh_token(refresh_token.clone()).await?;

        Ok(UserCreateResponse::new(access_token, refresh_token))
    }

    fn match_unknown_user(&self, raw_password: &str) {
        let hash = self
            .unknown_user_hash
            .get_or_try_init(|| self.password_encoder.encode(UNKNOWN_USER_PASSWORD));
        match hash {
            Ok(hash) => {
                let _ = self.password_encoder.matches(raw_password, hash);
            }
            Err(err) => tracing::error!(error = %err, "Failed to hash placeholder password"),
        }
    }

    async fn reissue(&self, tx: &W::Tx, refresh_key: &str) -> DomainResult<String> {
        let record = tx
            .find_refresh_token(refresh_key)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        let user = tx
            .find_by_id(record.value)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.is_active() {
            return Err(AuthError::AccountInactive.into());
        }

        self.token_service.create_access_token(&user)
    }

    async fn validate_duplicate_user(&self, tx: &W::Tx, email: &str) -> DomainResult<()> {
        if tx.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail {
                email: email.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn create_user(&self, request: &UserCreateRequest) -> DomainResult<User> {
        let password_hash = self.password_encoder.encode(&request.password)?;
        Ok(User::new(
            request.email.clone(),
            password_hash,
            request.name.clone(),
        ))
    }

    /// Commit on success, roll back on failure
    async fn finish<T>(tx: W::Tx, result: DomainResult<T>) -> DomainResult<T> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}
