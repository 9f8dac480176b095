//! Account lifecycle orchestration.

pub mod auth;

pub use auth::{AuthService, Credentials, LoginSurface, Registration};
