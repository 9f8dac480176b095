//! Integration tests for registration, verification and login.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

const GYM: &str = "0191d3c0-0000-7000-8000-000000000001";

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}

#[tokio::test]
async fn test_register_then_login_unverified_trainee() {
    let app = TestApp::new();

    let response = app.register("u@x.com", "trainee", Some(GYM)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.data()["account_id"].is_string());
    assert_eq!(response.data()["verified"], false);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "u@x.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.data()["role"], "trainee");
    assert_eq!(login.data()["token_type"], "Bearer");
    assert_eq!(login.data()["gym_id"], GYM);

    let token = login.data()["access_token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["role"], "trainee");
    assert_eq!(me.data()["account"]["email"], "u@x.com");
    assert_eq!(me.data()["account"]["verified"], false);
    assert!(me.data()["account"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts_across_roles() {
    let app = TestApp::new();
    assert_eq!(
        app.register("dup@x.com", "trainee", Some(GYM)).await.status,
        StatusCode::CREATED
    );

    let response = app.register("DUP@x.com", "manager", Some(GYM)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_admin_cannot_self_register() {
    let app = TestApp::new();
    let response = app.register("boss@x.com", "admin", None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "s@x.com", "password": "short", "role": "trainee" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new();
    app.register("t@x.com", "trainer", Some(GYM)).await;

    let missing = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@x.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "t@x.com", "password": "not-the-password" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error_code(), "INVALID_CREDENTIALS");

    let mismatch = app
        .request(
            "POST",
            "/api/auth/dashboard/login",
            Some(json!({ "email": "t@x.com", "password": PASSWORD, "role": "manager" })),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::FORBIDDEN);
    assert_eq!(mismatch.error_code(), "ROLE_MISMATCH");
}

#[tokio::test]
async fn test_verification_flow() {
    let app = TestApp::new();
    app.register("v@x.com", "trainee", Some(GYM)).await;
    let first = app.code_for("v@x.com", 1).await;
    let wrong = if first == "111111" { "222222" } else { "111111" };

    let rejected = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "v@x.com", "code": wrong })),
            None,
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.data()["verified"], false);

    // The failed attempt consumed the code.
    let burned = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "v@x.com", "code": first })),
            None,
        )
        .await;
    assert_eq!(burned.data()["verified"], false);

    let resend = app
        .request("POST", "/api/auth/resend", Some(json!({ "email": "v@x.com" })), None)
        .await;
    assert_eq!(resend.status, StatusCode::ACCEPTED);

    let fresh = app.code_for("v@x.com", 2).await;
    let accepted = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "v@x.com", "code": fresh })),
            None,
        )
        .await;
    assert_eq!(accepted.data()["verified"], true);

    let token = app.login_token("/api/auth/login", "v@x.com", None).await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.data()["account"]["verified"], true);
}

#[tokio::test]
async fn test_verify_and_resend_do_not_reveal_accounts() {
    let app = TestApp::new();
    app.register("real@x.com", "trainee", Some(GYM)).await;

    let known = app
        .request("POST", "/api/auth/resend", Some(json!({ "email": "real@x.com" })), None)
        .await;
    let unknown = app
        .request("POST", "/api/auth/resend", Some(json!({ "email": "ghost@x.com" })), None)
        .await;
    assert_eq!(known.status, unknown.status);
    assert_eq!(known.body, unknown.body);

    let verify_unknown = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "ghost@x.com", "code": "123456" })),
            None,
        )
        .await;
    assert_eq!(verify_unknown.status, StatusCode::OK);
    assert_eq!(verify_unknown.data()["verified"], false);
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    let app = TestApp::new();
    app.register("late@x.com", "trainee", Some(GYM)).await;
    let code = app.code_for("late@x.com", 1).await;

    app.clock.advance(chrono::Duration::minutes(11));

    let response = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "email": "late@x.com", "code": code })),
            None,
        )
        .await;
    assert_eq!(response.data()["verified"], false);
}
