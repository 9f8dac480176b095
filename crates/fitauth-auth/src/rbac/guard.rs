//! Bearer-token authentication and role check run before any protected handler.

use std::sync::Arc;

use http::HeaderMap;
use http::header::AUTHORIZATION;
use tracing::debug;

use fitauth_core::error::AppError;
use fitauth_core::result::AppResult;
use fitauth_entity::account::AccountRole;

use crate::jwt::{Claims, TokenIssuer};

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is missing, not valid text, uses another
/// scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authenticates a request's bearer token and enforces an allowed-role set.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    issuer: Arc<TokenIssuer>,
}

impl AccessGuard {
    /// Creates a guard validating tokens with `issuer`.
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }

    /// Authorizes a request.
    ///
    /// A missing header and every token validation failure, expired or
    /// malformed, are reported as the same `ErrorKind::Unauthenticated`.
    /// A valid token whose role is not in `allowed` is `ErrorKind::Forbidden`.
    pub fn authorize(&self, headers: &HeaderMap, allowed: &[AccountRole]) -> AppResult<Claims> {
        let Some(token) = extract_bearer(headers) else {
            debug!("Rejected request without bearer token");
            return Err(AppError::unauthenticated("Missing or invalid Authorization header"));
        };

        let claims = self.issuer.validate(token).map_err(|e| {
            debug!(reason = %e.kind, "Rejected invalid bearer token");
            AppError::unauthenticated("Invalid or expired token")
        })?;

        if !allowed.contains(&claims.role) {
            debug!(subject = %claims.sub, role = %claims.role, "Rejected disallowed role");
            return Err(AppError::forbidden(format!(
                "Role '{}' is not allowed to access this resource",
                claims.role
            )));
        }

        debug!(subject = %claims.sub, role = %claims.role, "Request authorized");
        Ok(claims)
    }
}
