//! # fitauth-database
//!
//! Storage for FitAuth: the [`AccountStore`] and [`OtpStore`] contracts,
//! their PostgreSQL implementations, in-memory implementations, and
//! connection and migration management.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryAccountStore, MemoryOtpStore};
pub use repositories::{AccountRepository, OtpRepository};
pub use store::{AccountStore, OtpStore};
