//! User entity representing a registered carpool member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Authority string derived from the role (`ROLE_USER`, `ROLE_ADMIN`)
    pub fn authority(&self) -> String {
        match self {
            Role::User => "ROLE_USER".to_string(),
            Role::Admin => "ROLE_ADMIN".to_string(),
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Active,
    Inactive,
    Suspended,
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, also used as the username
    pub email: String,

    /// Hashed password
    #[serde(skip_serializing)]
    pub password: String,

    /// Display name
    pub name: String,

    pub role: Role,

    pub status: Status,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user with the `User` role.
    ///
    /// `password_hash` must already be hashed.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password: password_hash,
            name,
            role: Role::User,
            status: Status::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// The stable username carried as the access token subject
    pub fn username(&self) -> &str {
        &self.email
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Changes the account status
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Authorities granted to this user
    pub fn authorities(&self) -> Vec<String> {
        vec![self.role.authority()]
    }
}
