use actix_web::HttpResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::auth::SessionContext;

/// Handler for GET /api/v1/auth/session
///
/// Returns the claims of the authenticated token.
pub async fn session(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse::from(&session))
}
