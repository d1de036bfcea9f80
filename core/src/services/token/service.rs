//! Main token service implementation

use std::sync::Arc;

use carpool_shared::config::JwtConfig;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::{Claims, RefreshToken};
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthenticatedIdentity;
use crate::errors::{DomainError, TokenError};
use crate::repositories::IdentityLookup;

use super::config::TokenServiceConfig;
use super::headers::RequestHeaders;
use super::signing_key::SigningKey;

/// Service minting and validating access and refresh tokens
pub struct TokenService<L: IdentityLookup> {
    signing_key: Arc<SigningKey>,
    config: TokenServiceConfig,
    validation: Validation,
    identity_lookup: L,
}

impl<L: IdentityLookup> TokenService<L> {
    /// Creates a new token service, deriving the signing key from `jwt.secret`
    ///
    /// # Arguments
    ///
    /// * `jwt` - JWT configuration
    /// * `identity_lookup` - Resolves token subjects to identities
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a configuration error if the secret is
    /// missing or too weak. Either case is fatal at startup.
    pub fn new(jwt: &JwtConfig, identity_lookup: L) -> Result<Self, DomainError> {
        let signing_key = SigningKey::from_secret(&jwt.secret)?;
        let config = TokenServiceConfig::try_from(jwt)?;
        Ok(Self::with_signing_key(Arc::new(signing_key), config, identity_lookup))
    }

    /// Creates a token service around an already derived signing key
    pub fn with_signing_key(
        signing_key: Arc<SigningKey>,
        config: TokenServiceConfig,
        identity_lookup: L,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            signing_key,
            config,
            validation,
            identity_lookup,
        }
    }

    /// Mints a short-lived access token whose subject is the user's username
    pub fn create_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user.username(),
            Utc::now(),
            self.config.access_token_lifetime,
        )?;
        let token = self.encode_jwt(&claims)?;
        tracing::debug!(user_id = %user.id, exp = claims.exp, "Issued access token");
        Ok(token)
    }

    /// Mints a refresh token record for `user`.
    ///
    /// The signed key carries a random subject; the owning user id is only in
    /// `value`. The caller is responsible for persisting the record.
    pub fn create_refresh_token(&self, user: &User) -> Result<RefreshToken, DomainError> {
        let claims = Claims::new_refresh_token(Utc::now(), self.config.refresh_token_lifetime)?;
        let key = self.encode_jwt(&claims)?;
        tracing::debug!(user_id = %user.id, exp = claims.exp, "Issued refresh token");
        Ok(RefreshToken::new(key, user.id))
    }

    /// Validates an access token and returns its subject
    ///
    /// # Errors
    ///
    /// * `TokenError::MalformedToken` - not a well-formed HS256 token with the expected claims
    /// * `TokenError::InvalidSignature` - signed with a different key
    /// * `TokenError::TokenExpired` - `exp` is in the past
    pub fn get_username(&self, token: &str) -> Result<String, DomainError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Validates a refresh token key's signature and expiry
    pub fn validate_refresh_token(&self, key: &str) -> Result<Claims, DomainError> {
        self.decode_claims(key)
    }

    /// Validates `token` and resolves the identity it asserts
    ///
    /// # Errors
    ///
    /// Any error of [`get_username`](Self::get_username), or
    /// `TokenError::UnknownIdentity` when the subject no longer resolves.
    pub async fn get_authentication(
        &self,
        token: &str,
    ) -> Result<AuthenticatedIdentity, DomainError> {
        let username = self.get_username(token)?;

        let details = match self.identity_lookup.load_by_username(&username).await? {
            Some(details) => details,
            None => {
                tracing::warn!(username = %username, "Token subject does not resolve to an identity");
                return Err(TokenError::UnknownIdentity { username }.into());
            }
        };

        Ok(AuthenticatedIdentity::from_details(details))
    }

    /// Extracts the raw token from the configured header.
    ///
    /// Returns `None` when the header is absent, blank, lacks the configured
    /// prefix, or carries nothing after it. `None` means an unauthenticated
    /// request, not an error.
    pub fn resolve_token<H>(&self, headers: &H) -> Option<String>
    where
        H: RequestHeaders + ?Sized,
    {
        let value = headers.header(&self.config.header)?;
        if value.trim().is_empty() {
            return None;
        }

        let token = value.strip_prefix(self.config.prefix.as_str())?;
        if token.trim().is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, self.signing_key.encoding_key()).map_err(
            |e| {
                tracing::error!(error = %e, "Failed to sign token");
                DomainError::Token(TokenError::TokenGenerationFailed)
            },
        )
    }

    /// Verifies signature and expiry and returns the claims of any token kind
    pub(crate) fn decode_claims(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, self.signing_key.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::MalformedToken,
                };
                tracing::debug!(reason = %e, "Rejected token");
                DomainError::Token(error)
            })
    }
}
