//! Random code generation.

use rand::Rng;
use rand::rngs::OsRng;

/// Smallest code handed out.
pub const CODE_MIN: u32 = 100_000;
/// Largest code handed out.
pub const CODE_MAX: u32 = 999_999;

/// Draws a uniformly random six-digit code from the OS RNG.
pub fn generate_code() -> String {
    OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_six_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }
}
