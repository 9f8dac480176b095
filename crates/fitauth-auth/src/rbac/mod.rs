//! Role-based access enforcement for protected endpoints.

pub mod guard;

pub use guard::{AccessGuard, extract_bearer};
