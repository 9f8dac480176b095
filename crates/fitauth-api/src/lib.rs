//! # fitauth-api
//!
//! HTTP API layer for FitAuth built on Axum.
//!
//! Provides the auth endpoints, the role guard middleware, the claims
//! extractor, DTOs, and error-to-status mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
