//! # fitauth-auth
//!
//! Identity and access control for the FitAuth platform.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and registration input checks
//! - `otp`: one-time email verification codes
//! - `jwt`: token signing, validation and claims
//! - `rbac`: bearer extraction and allowed-role enforcement
//! - `service`: registration, verification and login flows
//! - `notify`: bundled notifier implementations

pub mod crypto;
pub mod jwt;
pub mod notify;
pub mod otp;
pub mod password;
pub mod rbac;
pub mod service;

pub use jwt::{Claims, IssuedToken, TokenIssuer};
pub use otp::OtpManager;
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::AccessGuard;
pub use service::{AuthService, Credentials, LoginSurface, Registration};
