//! JWT authentication middleware.
//!
//! Resolves a bearer token from the configured header and, when one is
//! present, authenticates it through the core `TokenService`. Requests
//! without a token pass through unauthenticated; handlers that need an
//! identity take the [`AuthenticatedUser`] extractor.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use carpool_core::{AuthenticatedIdentity, IdentityLookup, RequestHeaders, TokenService};
use futures_util::future::LocalBoxFuture;

use crate::handlers::ApiError;

/// Adapts actix headers to the core header lookup
pub struct ActixHeaders<'a>(pub &'a HeaderMap);

impl RequestHeaders for ActixHeaders<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.get(name)?.to_str().ok()
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth<L: IdentityLookup> {
    token_service: Arc<TokenService<L>>,
}

impl<L: IdentityLookup> JwtAuth<L> {
    pub fn new(token_service: Arc<TokenService<L>>) -> Self {
        Self { token_service }
    }
}

impl<L: IdentityLookup> Clone for JwtAuth<L> {
    fn clone(&self) -> Self {
        Self {
            token_service: Arc::clone(&self.token_service),
        }
    }
}

impl<S, B, L> Transform<S, ServiceRequest> for JwtAuth<L>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    L: IdentityLookup + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S, L>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S, L: IdentityLookup> {
    service: Rc<S>,
    token_service: Arc<TokenService<L>>,
}

impl<S, B, L> Service<ServiceRequest> for JwtAuthMiddleware<S, L>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    L: IdentityLookup + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = token_service.resolve_token(&ActixHeaders(req.headers()));

            if let Some(token) = token {
                match token_service.get_authentication(&token).await {
                    Ok(identity) => {
                        log::debug!("Authenticated {} for {}", identity.username(), req.path());
                        req.extensions_mut().insert(identity);
                    }
                    Err(err) => {
                        let response = ApiError::from(err).error_response();
                        return Ok(req.into_response(response).map_into_right_body());
                    }
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extractor for handlers that require an authenticated identity
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthenticatedIdentity);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        self.0.username()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| ApiError::Unauthorized.into());

        ready(result)
    }
}
