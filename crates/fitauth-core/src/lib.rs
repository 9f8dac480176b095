//! # fitauth-core
//!
//! Core crate for FitAuth. Contains the configuration schema, typed
//! identifiers, collaborator traits (clock, notifier), and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other FitAuth crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
