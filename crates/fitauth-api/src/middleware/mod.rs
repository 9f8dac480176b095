//! Axum middleware stack.

pub mod cors;
pub mod guard;
pub mod logging;

pub use guard::{ANY_ROLE, RoleGate, STAFF_ROLES, require_roles};
