//! # Carpool API
//!
//! actix-web layer: JWT authentication filter, error-to-status mapping and
//! the application factory used by the binary and the integration tests.

pub mod app;
pub mod handlers;
pub mod middleware;
pub mod routes;
