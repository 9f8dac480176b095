//! `AuthClaims` extractor: reads the claims the role guard attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use fitauth_auth::Claims;
use fitauth_core::error::AppError;

use crate::error::ApiError;

/// Validated token claims available in handlers behind the role guard.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl std::ops::Deref for AuthClaims {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route is wrapped in `require_roles`.
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| ApiError(AppError::unauthenticated("Authentication required")))
    }
}
