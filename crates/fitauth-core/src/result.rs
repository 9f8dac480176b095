//! Convenience result type alias for FitAuth.

use crate::error::AppError;

/// A specialized `Result` type for FitAuth operations.
pub type AppResult<T> = Result<T, AppError>;
