//! In-memory store implementations for single-node deployments and tests.

pub mod account;
pub mod otp;

pub use account::MemoryAccountStore;
pub use otp::MemoryOtpStore;
