//! Authentication route handlers
//!
//! - Logout (token revocation)
//! - Session introspection

pub mod logout;
pub mod session;

use actix_web::web;

use crate::middleware::auth::JwtAuth;

/// Registers the `/auth` scope; every route requires a bearer token
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(JwtAuth::new())
            .route("/logout", web::post().to(logout::logout))
            .route("/session", web::get().to(session::session)),
    );
}
