//! HTTP route handlers

use actix_web::HttpResponse;

use crate::middleware::AuthenticatedUser;

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "carpool-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Returns the identity the bearer token resolved to
pub async fn current_user(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "username": user.username(),
        "authorities": user.0.authorities,
        "enabled": user.0.principal.enabled,
    }))
}
