//! One-time email verification codes.

pub mod generator;
pub mod manager;

pub use generator::generate_code;
pub use manager::OtpManager;
