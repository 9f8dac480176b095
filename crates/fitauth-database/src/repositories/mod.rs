//! PostgreSQL implementations of the store contracts.

pub mod account;
pub mod otp;

pub use account::AccountRepository;
pub use otp::OtpRepository;
