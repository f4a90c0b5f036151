//! Bearer-token authentication middleware.
//!
//! Extracts the token from the `Authorization` header, checks it through the
//! [`SessionGuard`] registered as app data and injects a [`SessionContext`]
//! into the request. When the token's renewal window has passed the
//! response carries `X-Token-Refresh: true`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use jm_core::{
    domain::entities::token::{claims, Claims},
    errors::{DomainError, TokenError},
    repositories::RevocationStore,
    services::token::TokenManager,
};

use crate::handlers::error::ApiError;

/// Response header set when the client should renew its token
pub const REFRESH_HEADER: &str = "x-token-refresh";

/// Authenticated session injected into requests
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Raw `sub` claim, empty when absent
    pub subject: String,
    pub audience: Option<String>,
    pub issuer: Option<String>,
    pub jti: String,
    pub issued_at: i64,
    pub expires_at: i64,
    pub needs_refresh: bool,
    pub claims: Claims,
}

impl SessionContext {
    /// Builds a session from checked claims
    pub fn from_claims(payload: Claims, needs_refresh: bool) -> Result<Self, DomainError> {
        let jti = payload
            .jti()
            .ok_or_else(|| TokenError::missing_claim(claims::TOKEN_ID))?
            .to_string();
        let issued_at = payload
            .iat()
            .ok_or_else(|| TokenError::missing_claim(claims::ISSUED_AT))?;
        let expires_at = payload
            .exp()
            .ok_or_else(|| TokenError::missing_claim(claims::EXPIRES_AT))?;

        Ok(Self {
            subject: payload.sub().unwrap_or_default().to_string(),
            audience: payload.aud().map(str::to_string),
            issuer: payload.iss().map(str::to_string),
            jti,
            issued_at,
            expires_at,
            needs_refresh,
            claims: payload,
        })
    }
}

/// Object-safe view of a token manager used by the HTTP layer
///
/// Lets the app hold `web::Data<dyn SessionGuard>` without being generic
/// over the revocation store.
#[async_trait]
pub trait SessionGuard: Send + Sync {
    /// Signature, revocation and expiry checks, in that order
    async fn authenticate(&self, token: &str) -> Result<SessionContext, DomainError>;

    /// Revokes the token for good
    async fn revoke(&self, token: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<S: RevocationStore + 'static> SessionGuard for TokenManager<S> {
    async fn authenticate(&self, token: &str) -> Result<SessionContext, DomainError> {
        self.is_valid(token).await?;
        self.is_on_time(token)?;
        let needs_refresh = self.token_need_to_refresh(token)?;

        SessionContext::from_claims(self.decode_payload(token)?, needs_refresh)
    }

    async fn revoke(&self, token: &str) -> Result<bool, DomainError> {
        self.turn_invalid(token).await
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let session = match authenticate(&req).await {
                Ok(session) => session,
                Err(error) => {
                    tracing::warn!(path = %req.path(), error = %error, "Authentication rejected");
                    let response = error.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let needs_refresh = session.needs_refresh;
            req.extensions_mut().insert(session);

            let mut response = service.call(req).await?.map_into_left_body();
            if needs_refresh {
                response.headers_mut().insert(
                    HeaderName::from_static(REFRESH_HEADER),
                    HeaderValue::from_static("true"),
                );
            }

            Ok(response)
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<SessionContext, ApiError> {
    let token = extract_bearer_token(req.headers()).ok_or(ApiError::MissingToken)?;

    let guard = req
        .app_data::<web::Data<dyn SessionGuard>>()
        .cloned()
        .ok_or_else(|| DomainError::Internal {
            message: "No session guard registered".to_string(),
        })?;

    Ok(guard.authenticate(&token).await?)
}

/// Extracts the Bearer token from an `Authorization` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| ApiError::MissingToken.into());

        ready(result)
    }
}
