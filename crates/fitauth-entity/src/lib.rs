//! # fitauth-entity
//!
//! Domain entity models for FitAuth. Every struct in this crate represents
//! a stored record or a domain value object. Persisted entities
//! additionally derive `sqlx::FromRow`.

pub mod account;
pub mod otp;
