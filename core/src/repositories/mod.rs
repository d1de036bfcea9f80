//! Repository and collaborator interfaces, plus the in-memory store.

pub mod identity;
pub mod memory;
pub mod token;
pub mod unit_of_work;
pub mod user;

pub use identity::{IdentityLookup, UserIdentityLookup};
pub use memory::{InMemoryStore, InMemoryTransaction};
pub use token::RefreshTokenRepository;
pub use unit_of_work::{Transaction, UnitOfWork};
pub use user::UserRepository;
