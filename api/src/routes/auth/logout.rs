use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::{handle_domain_error, ApiError};
use crate::middleware::auth::{extract_bearer_token, SessionContext, SessionGuard};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented token. Any later request carrying it is rejected
/// with `TOKEN_REVOKED`.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or already revoked token
/// - 400 Bad Request: The revocation could not be recorded
pub async fn logout(
    req: HttpRequest,
    sessions: web::Data<dyn SessionGuard>,
    session: SessionContext,
) -> Result<HttpResponse, ApiError> {
    let token = extract_bearer_token(req.headers()).ok_or(ApiError::MissingToken)?;

    match sessions.revoke(&token).await {
        Ok(_) => {
            tracing::info!(jti = %session.jti, "Session revoked");
            Ok(HttpResponse::Ok().json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            }))
        }
        Err(error) => Ok(handle_domain_error(error)),
    }
}
