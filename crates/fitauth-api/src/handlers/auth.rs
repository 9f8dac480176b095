//! Auth handlers: register, verify, resend, login, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use fitauth_auth::LoginSurface;
use fitauth_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest, ResendCodeRequest, VerifyEmailRequest};
use crate::dto::response::{
    ApiResponse, IdentityResponse, MessageResponse, RegisterResponse, TokenResponse,
    VerifyEmailResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthClaims;
use crate::state::AppState;

/// POST /api/auth/register
///
/// Admin accounts are provisioned out of band and cannot self-register.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    if req.role.is_admin() {
        return Err(AppError::forbidden("Admin accounts cannot be self-registered").into());
    }

    let account_id = state.auth.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RegisterResponse {
            account_id,
            verified: false,
        })),
    ))
}

/// POST /api/auth/verify
pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<ApiResponse<VerifyEmailResponse>>, ApiError> {
    let verified = state.auth.verify_email(&req.email, &req.code).await?;
    Ok(Json(ApiResponse::ok(VerifyEmailResponse { verified })))
}

/// POST /api/auth/resend
///
/// Always answers the same way so callers cannot probe for accounts.
pub async fn resend_code(
    State(state): State<AppState>,
    Json(req): Json<ResendCodeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.auth.reissue(&req.email).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok(MessageResponse {
            message: "If the account is awaiting verification, a new code has been sent"
                .to_string(),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let issued = state.auth.login(req.into(), LoginSurface::App).await?;
    Ok(Json(ApiResponse::ok(issued.into())))
}

/// POST /api/auth/dashboard/login
pub async fn dashboard_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let issued = state.auth.login(req.into(), LoginSurface::Dashboard).await?;
    Ok(Json(ApiResponse::ok(issued.into())))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<ApiResponse<IdentityResponse>>, ApiError> {
    let account = if claims.is_bootstrap_admin() {
        None
    } else {
        Some(state.auth.identity(&claims).await?)
    };
    Ok(Json(ApiResponse::ok(IdentityResponse::new(&claims, account))))
}

/// GET /api/dashboard/session
///
/// Token identity for dashboard clients; staff roles only.
pub async fn dashboard_session(
    AuthClaims(claims): AuthClaims,
) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(IdentityResponse::new(&claims, None)))
}
