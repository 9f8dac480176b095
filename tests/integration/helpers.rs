//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use fitauth_api::{AppState, build_app};
use fitauth_auth::notify::MemoryNotifier;
use fitauth_auth::{AccessGuard, AuthService, OtpManager, TokenIssuer};
use fitauth_core::config::{AuthConfig, CorsConfig, OtpConfig};
use fitauth_core::traits::ManualClock;
use fitauth_database::{MemoryAccountStore, MemoryOtpStore};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Captured verification emails
    pub outbox: MemoryNotifier,
    /// Clock shared by the token issuer and the OTP manager
    pub clock: Arc<ManualClock>,
}

/// Status and parsed JSON body of a test response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success response.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The machine-readable code of an error response.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub const PASSWORD: &str = "pw123456";

impl TestApp {
    /// Create a test application with the default lenient policy
    pub fn new() -> Self {
        Self::with_auth(AuthConfig::with_secret("integration-secret"))
    }

    /// Create a test application with a custom auth configuration
    pub fn with_auth(auth_config: AuthConfig) -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let outbox = MemoryNotifier::new();
        let otp_config = OtpConfig::default();

        let tokens = Arc::new(TokenIssuer::new(&auth_config, clock.clone()));
        let otp = Arc::new(OtpManager::new(
            Arc::new(MemoryOtpStore::new()),
            clock.clone(),
            &otp_config,
        )
        .expect("Failed to build otp manager"));
        let auth = AuthService::new(
            Arc::new(MemoryAccountStore::with_clock(clock.clone())),
            otp,
            Arc::new(outbox.clone()),
            tokens.clone(),
            clock.clone(),
            &auth_config,
            &otp_config,
        )
        .expect("Failed to build auth service");

        let state = AppState::new(Arc::new(auth), Arc::new(AccessGuard::new(tokens)));

        Self {
            router: build_app(state, &CorsConfig::default()),
            outbox,
            clock,
        }
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a prepared request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register an account with the shared test password
    pub async fn register(&self, email: &str, role: &str, gym_id: Option<&str>) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": email,
                "password": PASSWORD,
                "role": role,
                "gym_id": gym_id,
                "profile": { "name": "Test User" },
            })),
            None,
        )
        .await
    }

    /// Log in through `path` and return the bearer token
    pub async fn login_token(&self, path: &str, email: &str, role: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                path,
                Some(json!({ "email": email, "password": PASSWORD, "role": role })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.data()["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Wait for the `nth` verification email to `email` and return its code
    pub async fn code_for(&self, email: &str, nth: usize) -> String {
        for _ in 0..200 {
            let sent: Vec<_> = self
                .outbox
                .sent()
                .into_iter()
                .filter(|m| m.to == email)
                .collect();
            if let Some(message) = sent.get(nth - 1) {
                return message
                    .body
                    .split_whitespace()
                    .find(|w| w.len() == 6 && w.chars().all(|c| c.is_ascii_digit()))
                    .expect("no code in email body")
                    .to_string();
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no verification email #{nth} for {email}");
    }
}
