//! Route definitions for the FitAuth HTTP API.
//!
//! All routes are mounted under `/api`. Protected groups are wrapped in the
//! role guard with `route_layer`, so the guard runs before the handler and
//! unmatched paths still return 404.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::{ANY_ROLE, RoleGate, STAFF_ROLES, require_roles};
use crate::state::AppState;

/// Build the API router. Layers are added by [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(identity_routes(&state))
        .merge(dashboard_routes(&state))
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Public auth endpoints: register, verify, resend, login
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/verify", post(handlers::auth::verify_email))
        .route("/auth/resend", post(handlers::auth::resend_code))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/dashboard/login", post(handlers::auth::dashboard_login))
}

/// Identity endpoints open to every authenticated role
fn identity_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            RoleGate::new(state.guard.clone(), ANY_ROLE),
            require_roles,
        ))
}

/// Dashboard endpoints for admins, managers and trainers
fn dashboard_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard/session", get(handlers::auth::dashboard_session))
        .route_layer(axum_middleware::from_fn_with_state(
            RoleGate::new(state.guard.clone(), STAFF_ROLES),
            require_roles,
        ))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
