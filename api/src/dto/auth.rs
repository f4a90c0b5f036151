use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::middleware::auth::SessionContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Body of `GET /api/v1/auth/session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub subject: String,
    pub audience: Option<String>,
    pub issuer: Option<String>,
    pub jti: String,
    pub issued_at: i64,
    pub expires_at: i64,
    /// Renewal window has passed; the client should obtain a new token
    pub needs_refresh: bool,
    /// Every claim carried by the token, reserved ones included
    pub claims: Map<String, Value>,
}

impl From<&SessionContext> for SessionResponse {
    fn from(session: &SessionContext) -> Self {
        Self {
            subject: session.subject.clone(),
            audience: session.audience.clone(),
            issuer: session.issuer.clone(),
            jti: session.jti.clone(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
            needs_refresh: session.needs_refresh,
            claims: session.claims.as_map().clone(),
        }
    }
}
