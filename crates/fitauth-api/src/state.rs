//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use fitauth_auth::{AccessGuard, AuthService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration, verification and login flows
    pub auth: Arc<AuthService>,
    /// Bearer token and role enforcement
    pub guard: Arc<AccessGuard>,
}

impl AppState {
    /// Creates the state from its two collaborators.
    pub fn new(auth: Arc<AuthService>, guard: Arc<AccessGuard>) -> Self {
        Self { auth, guard }
    }
}
