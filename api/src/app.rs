//! Token service wiring and application factory
//!
//! Builds the shared token service once at startup and provides the factory
//! for the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use carpool_core::{DomainError, IdentityLookup, InMemoryStore, TokenService, UserIdentityLookup};
use carpool_shared::config::AppConfig;
use carpool_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::JwtAuth;
use crate::routes::{current_user, health_check};

pub type AppTokenService = TokenService<UserIdentityLookup<InMemoryStore>>;

/// Builds the token service shared by every worker.
///
/// Fails with a `ConfigurationError` when the signing secret or a lifetime
/// is invalid, so a misconfigured server never starts.
pub fn build_token_service(
    config: &AppConfig,
    store: InMemoryStore,
) -> Result<Arc<AppTokenService>, DomainError> {
    let token_service = TokenService::new(&config.jwt, UserIdentityLookup::new(store))?;
    Ok(Arc::new(token_service))
}

/// Create and configure the application
pub fn create_app<L>(
    token_service: Arc<TokenService<L>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    L: IdentityLookup + 'static,
{
    App::new()
        .wrap(JwtAuth::new(token_service))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").route("/me", web::get().to(current_user)))
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
