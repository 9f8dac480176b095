//! Email verification challenge entities.

pub mod model;

pub use model::OtpChallenge;
