//! Core type definitions used across the FitAuth workspace.

pub mod id;

pub use id::{AccountId, GymId};
