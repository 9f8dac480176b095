//! Constant-time comparison of secrets.

use std::sync::OnceLock;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Per-process key; comparisons only need it to be unknown to the caller.
fn comparison_key() -> &'static [u8; 32] {
    static KEY: OnceLock<[u8; 32]> = OnceLock::new();
    KEY.get_or_init(rand::random)
}

/// Compares two secrets without leaking where they differ.
///
/// Both sides are MACed first, so timing is also independent of their lengths.
pub fn constant_time_eq(expected: &str, supplied: &str) -> bool {
    let key = comparison_key();

    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(expected.as_bytes());
    let expected_tag = mac.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(supplied.as_bytes());
    mac.verify_slice(&expected_tag).is_ok()
}
