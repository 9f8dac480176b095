//! Role guard middleware. Runs the access guard before any handler logic.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use fitauth_auth::AccessGuard;
use fitauth_entity::account::AccountRole;

use crate::error::ApiError;

/// Any authenticated account.
pub const ANY_ROLE: &[AccountRole] = &AccountRole::ALL;

/// Roles that sign in through the web dashboard.
pub const STAFF_ROLES: &[AccountRole] = &[
    AccountRole::Admin,
    AccountRole::Manager,
    AccountRole::Trainer,
];

/// Middleware state: the guard plus the roles a route group admits.
#[derive(Debug, Clone)]
pub struct RoleGate {
    guard: Arc<AccessGuard>,
    allowed: &'static [AccountRole],
}

impl RoleGate {
    /// Creates a gate admitting only `allowed`.
    pub fn new(guard: Arc<AccessGuard>, allowed: &'static [AccountRole]) -> Self {
        Self { guard, allowed }
    }
}

/// Authorizes the request and stores its claims in the request extensions.
///
/// Use with `axum::middleware::from_fn_with_state(RoleGate, require_roles)`.
pub async fn require_roles(
    State(gate): State<RoleGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = gate.guard.authorize(request.headers(), gate.allowed)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
