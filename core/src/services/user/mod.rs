//! User service module: registration, login and access token reissue

mod dto;
mod service;

#[cfg(test)]
mod tests;

pub use dto::{LoginRequest, UserCreateRequest};
pub use service::UserService;
