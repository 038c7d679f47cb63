//! End-to-end middleware tests
//!
//! Runs requests through the full axum stack - exclusion filter, token
//! extraction, verification, gate decision, response mapping - against an
//! in-memory verifier.

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, COOKIE, LOCATION};
use axum::http::{Request, StatusCode};
use concierge::access::{Role, Session};
use concierge::auth::MemoryVerifier;
use concierge::config::load_config_from_str;
use concierge::server::{GateState, gateway_router};
use std::sync::Arc;
use tower::ServiceExt;

const POLICY: &str = r#"
[[gate.routes]]
prefix = "/dashboard"
roles = ["platform_admin", "customer_admin"]

[[gate.routes]]
prefix = "/contracts"
roles = ["platform_admin"]

[gate.actions.employees]
update = ["platform_admin", "customer_admin"]
"#;

fn app() -> Router {
    let config = load_config_from_str(POLICY).unwrap();

    let verifier = MemoryVerifier::new()
        .with_session("tok-platform", Session::new(Role::PlatformAdmin))
        .with_session(
            "tok-customer",
            Session::for_customer(Role::CustomerAdmin, "acme"),
        )
        .with_session("tok-employee", Session::new(Role::Employee));

    let state = Arc::new(GateState::from_config(&config, Box::new(verifier)).unwrap());

    gateway_router(state, Router::new().fallback(|| async { StatusCode::OK }))
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn get_with_cookie(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(COOKIE, format!("session_token={token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn allowed_page_passes_through() {
    let response = app()
        .oneshot(get_with_cookie("/dashboard", "tok-platform"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn denied_page_redirects_to_not_found() {
    let response = app()
        .oneshot(get_with_cookie("/contracts", "tok-customer"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/404");
}

#[tokio::test]
async fn unauthenticated_page_redirects_to_not_found() {
    let response = app().oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/404");
}

#[tokio::test]
async fn forged_token_is_treated_as_unauthenticated() {
    let response = app()
        .oneshot(get_with_cookie("/dashboard", "tok-forged"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/404");
}

#[tokio::test]
async fn login_open_without_session_redirects_with_one() {
    let app = app();

    let response = app.clone().oneshot(get("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_with_cookie("/login", "tok-customer"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/dashboard");
}

#[tokio::test]
async fn root_redirects_to_landing() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/dashboard");
}

#[tokio::test]
async fn mobile_api_returns_bare_403_for_wrong_role() {
    let response = app()
        .oneshot(get_with_cookie("/api/mobile/offers", "tok-customer"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn mobile_api_allows_employee_via_bearer_header() {
    let request = Request::builder()
        .uri("/api/mobile/offers")
        .header(AUTHORIZATION, "Bearer tok-employee")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn files_api_passes_without_session() {
    let response = app().oneshot(get("/api/files/contract.pdf")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn excluded_paths_bypass_the_gate() {
    let app = app();

    for path in [
        "/static/app.css",
        "/favicon.ico",
        "/404",
        "/logout",
        "/api/auth/callback",
        "/api/security/forgot-password",
    ] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "excluded path {path} must reach the downstream handler untouched"
        );
    }
}

#[tokio::test]
async fn api_action_without_policy_entry_fails_closed() {
    let response = app()
        .oneshot(get_with_cookie("/api/offers/delete", "tok-platform"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/404");
}
