//! Integration tests for the bearer authentication middleware

use std::sync::Arc;

use actix_web::{test, web, App, HttpResponse};
use jm_api::dto::SessionResponse;
use jm_api::middleware::auth::{JwtAuth, SessionContext, SessionGuard, REFRESH_HEADER};
use jm_core::{InMemoryRevocationStore, TokenManager, TokenManagerConfig};
use jm_shared::ErrorResponse;
use serde_json::{json, Map};

type Manager = TokenManager<InMemoryRevocationStore>;

const SECRET: &str = "middleware-secret";

fn manager(config: TokenManagerConfig) -> Arc<Manager> {
    Arc::new(TokenManager::new(InMemoryRevocationStore::new(), config).unwrap())
}

async fn protected(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "subject": session.subject, "jti": session.jti }))
}

macro_rules! protected_app {
    ($manager:expr) => {{
        let sessions: Arc<dyn SessionGuard> = $manager;
        test::init_service(
            App::new()
                .app_data(web::Data::from(sessions))
                .service(
                    web::scope("")
                        .wrap(JwtAuth::new())
                        .route("/protected", web::get().to(protected)),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = protected_app!(manager(TokenManagerConfig::new(SECRET, "test")));

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_middleware_rejects_malformed_token() {
    let app = protected_app!(manager(TokenManagerConfig::new(SECRET, "test")));

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_middleware_rejects_foreign_signature() {
    let other = manager(TokenManagerConfig::new("someone-else", "test"));
    let token = other.generate("web", "1", Map::new()).unwrap();
    let app = protected_app!(manager(TokenManagerConfig::new(SECRET, "test")));

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_middleware_accepts_valid_token() {
    let manager = manager(TokenManagerConfig::new(SECRET, "test"));
    let token = manager.generate("web", "42", Map::new()).unwrap();
    let app = protected_app!(manager.clone());

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get(REFRESH_HEADER).is_none());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subject"], "42");
    assert_eq!(
        body["jti"],
        json!(manager.decode_payload(&token).unwrap().jti().unwrap())
    );
}

#[actix_web::test]
async fn test_middleware_flags_tokens_past_renewal_window() {
    let manager = manager(TokenManagerConfig::new(SECRET, "test").with_renew_seconds(0));
    let token = manager.generate("web", "42", Map::new()).unwrap();
    let app = protected_app!(manager);

    actix_rt::time::sleep(std::time::Duration::from_millis(1100)).await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get(REFRESH_HEADER).unwrap(), "true");
}

#[actix_web::test]
async fn test_middleware_rejects_expired_token() {
    let manager = manager(
        TokenManagerConfig::new(SECRET, "test")
            .with_expire_seconds(1)
            .with_renew_seconds(1),
    );
    let token = manager.generate("web", "42", Map::new()).unwrap();
    let app = protected_app!(manager);

    actix_rt::time::sleep(std::time::Duration::from_millis(2100)).await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_session_extractor_without_middleware() {
    let app = test::init_service(App::new().route("/protected", web::get().to(protected))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_session_endpoint_returns_claims() {
    let manager = manager(TokenManagerConfig::new(SECRET, "issuer-a"));
    let mut extra = Map::new();
    extra.insert("role".to_string(), json!("admin"));
    let token = manager.generate("mobile", "7", extra).unwrap();

    let sessions: Arc<dyn SessionGuard> = manager;
    let app = test::init_service(jm_api::create_app(sessions)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: SessionResponse = test::read_body_json(resp).await;
    assert_eq!(body.subject, "7");
    assert_eq!(body.audience.as_deref(), Some("mobile"));
    assert_eq!(body.issuer.as_deref(), Some("issuer-a"));
    assert_eq!(body.expires_at, body.issued_at + 900);
    assert!(!body.needs_refresh);
    assert_eq!(body.claims["role"], json!("admin"));
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let sessions: Arc<dyn SessionGuard> = manager(TokenManagerConfig::new(SECRET, "test"));
    let app = test::init_service(jm_api::create_app(sessions)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(resp.status(), 404);
}
