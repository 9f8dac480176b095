//! Integration tests for the role guard and token lifetimes.

use http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::json;

use fitauth_core::config::{AuthConfig, BootstrapAdminConfig};

use crate::helpers::{PASSWORD, TestApp};

const GYM: &str = "0191d3c0-0000-7000-8000-000000000002";

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthenticated() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_and_malformed_tokens_look_the_same() {
    let app = TestApp::new();
    app.register("u@x.com", "trainee", Some(GYM)).await;
    let token = app.login_token("/api/auth/login", "u@x.com", None).await;

    let ok = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(ok.status, StatusCode::OK);

    app.clock.advance(chrono::Duration::minutes(61));
    let expired = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;

    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.body, garbage.body);
}

#[tokio::test]
async fn test_dashboard_token_outlives_app_token() {
    let app = TestApp::new();
    app.register("m@x.com", "manager", Some(GYM)).await;
    let app_token = app.login_token("/api/auth/login", "m@x.com", None).await;
    let dash_token = app
        .login_token("/api/auth/dashboard/login", "m@x.com", Some("manager"))
        .await;

    app.clock.advance(chrono::Duration::hours(2));

    let app_me = app.request("GET", "/api/auth/me", None, Some(&app_token)).await;
    let dash_me = app.request("GET", "/api/auth/me", None, Some(&dash_token)).await;
    assert_eq!(app_me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(dash_me.status, StatusCode::OK);
    assert_eq!(dash_me.data()["gym_id"], GYM);
}

#[tokio::test]
async fn test_staff_route_rejects_trainee() {
    let app = TestApp::new();
    app.register("trainee@x.com", "trainee", Some(GYM)).await;
    app.register("coach@x.com", "trainer", Some(GYM)).await;

    let trainee = app.login_token("/api/auth/login", "trainee@x.com", None).await;
    let denied = app
        .request("GET", "/api/dashboard/session", None, Some(&trainee))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.error_code(), "FORBIDDEN");

    let coach = app
        .login_token("/api/auth/dashboard/login", "coach@x.com", Some("trainer"))
        .await;
    let allowed = app
        .request("GET", "/api/dashboard/session", None, Some(&coach))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.data()["role"], "trainer");
}

#[tokio::test]
async fn test_strict_policy_blocks_unverified_trainer() {
    let mut config = AuthConfig::with_secret("integration-secret");
    config.require_verified.trainer = true;
    let app = TestApp::with_auth(config);
    app.register("coach@x.com", "trainer", Some(GYM)).await;

    let blocked = app
        .request(
            "POST",
            "/api/auth/dashboard/login",
            Some(json!({ "email": "coach@x.com", "password": PASSWORD, "role": "trainer" })),
            None,
        )
        .await;
    assert_eq!(blocked.status, StatusCode::FORBIDDEN);
    assert_eq!(blocked.error_code(), "FORBIDDEN");

    let code = app.code_for("coach@x.com", 1).await;
    app.request(
        "POST",
        "/api/auth/verify",
        Some(json!({ "email": "coach@x.com", "code": code })),
        None,
    )
    .await;

    app.login_token("/api/auth/dashboard/login", "coach@x.com", Some("trainer"))
        .await;
}

#[tokio::test]
async fn test_bootstrap_admin_dashboard_login() {
    let mut config = AuthConfig::with_secret("integration-secret");
    config.bootstrap_admin = Some(BootstrapAdminConfig {
        email: "root@club.test".to_string(),
        password: SecretString::from(PASSWORD.to_string()),
    });
    let app = TestApp::with_auth(config);

    let token = app
        .login_token("/api/auth/dashboard/login", "root@club.test", Some("admin"))
        .await;

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["subject"], "admin");
    assert_eq!(me.data()["role"], "admin");
    assert!(me.data()["account"].is_null());

    let session = app
        .request("GET", "/api/dashboard/session", None, Some(&token))
        .await;
    assert_eq!(session.status, StatusCode::OK);

    let app_surface = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "root@club.test", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(app_surface.status, StatusCode::NOT_FOUND);
}
