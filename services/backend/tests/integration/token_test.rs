//! Session token flow exercised through the real router: routes that do not
//! need a live database run against a disconnected state.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use skillstream_backend::domain::types::OtpPolicy;
use skillstream_backend::router::build_router;
use skillstream_backend::state::AppState;
use skillstream_backend::usecase::token::issue_session_token;

use crate::helpers::test_user;

const SECRET: &str = "router-test-secret";

fn test_router() -> axum::Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: SECRET.to_owned(),
        token_lifetime_secs: 600,
        otp_policy: OtpPolicy::default(),
    })
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn healthz_is_public() {
    let response = test_router().oneshot(get("/healthz", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn interest_catalog_is_public() {
    let response = test_router()
        .oneshot(get("/api/interests", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let options: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let options = options.as_array().unwrap();
    assert_eq!(options.len(), 8);
    assert!(
        options
            .iter()
            .any(|o| o["name"] == "DATA_SCIENCE" && o["display_name"] == "Data Science")
    );
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let response = test_router()
        .oneshot(get("/api/homepage", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "AUTHENTICATION_FAILED");
    assert_eq!(body["message"], "authentication failed");
}

#[tokio::test]
async fn protected_route_rejects_forged_token() {
    let forged = issue_session_token(&test_user(), "some-other-secret", 600).unwrap();
    let response = test_router()
        .oneshot(get("/api/homepage", Some(&forged)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_accepts_valid_token() {
    let token = issue_session_token(&test_user(), SECRET, 600).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn logout_succeeds_without_a_token() {
    // Stateless sessions: a client with an expired (or no) token can
    // still log out.
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = test_router().oneshot(get("/healthz", None)).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
