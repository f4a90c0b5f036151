//! Application factory
//!
//! Builds the actix-web application around a shared [`SessionGuard`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use jm_shared::{error_codes, ErrorResponse};

use crate::middleware::auth::SessionGuard;
use crate::routes::{auth, health::health_check};

/// Create and configure the application
///
/// # Arguments
/// * `sessions` - Token manager behind the object-safe guard
pub fn create_app(
    sessions: Arc<dyn SessionGuard>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(sessions))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(auth::configure))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
