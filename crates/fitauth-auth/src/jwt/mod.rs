//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod issuer;

pub use claims::{BOOTSTRAP_ADMIN_SUBJECT, Claims};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use issuer::{IssuedToken, TokenIssuer};
