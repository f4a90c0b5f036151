//! # JwtManager API
//!
//! actix-web surface over the token manager: bearer authentication
//! middleware, logout (revocation) and session introspection.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use middleware::auth::{JwtAuth, SessionContext, SessionGuard};
