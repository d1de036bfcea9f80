//! Identity value objects produced by token authentication.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;

/// Identity details returned by an identity lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDetails {
    /// Username the identity was resolved by
    pub username: String,

    /// Granted authorities (e.g. `ROLE_USER`)
    pub authorities: Vec<String>,

    /// Whether the account may authenticate
    pub enabled: bool,
}

impl IdentityDetails {
    pub fn new(username: impl Into<String>, authorities: Vec<String>, enabled: bool) -> Self {
        Self {
            username: username.into(),
            authorities,
            enabled,
        }
    }

    /// Checks whether the identity holds `authority`
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}

impl From<&User> for IdentityDetails {
    fn from(user: &User) -> Self {
        Self::new(user.username(), user.authorities(), user.is_active())
    }
}

/// An identity authenticated by a bearer token.
///
/// `credentials` is always `None`: the token already proved the identity, no
/// password travels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    /// The resolved identity
    pub principal: IdentityDetails,

    /// Credential material (never populated for token authentication)
    pub credentials: Option<String>,

    /// Authorities copied from the principal
    pub authorities: Vec<String>,
}

impl AuthenticatedIdentity {
    /// Builds an authenticated identity from resolved details
    pub fn from_details(principal: IdentityDetails) -> Self {
        let authorities = principal.authorities.clone();
        Self {
            principal,
            credentials: None,
            authorities,
        }
    }

    pub fn username(&self) -> &str {
        &self.principal.username
    }
}
