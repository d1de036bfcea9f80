pub mod auth;

pub use auth::{ActixHeaders, AuthenticatedUser, JwtAuth, JwtAuthMiddleware};
