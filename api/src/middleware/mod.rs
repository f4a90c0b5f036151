//! HTTP middleware

pub mod auth;

pub use auth::{JwtAuth, SessionContext, SessionGuard, REFRESH_HEADER};
