//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use fitauth_core::error::AppError;

/// Memory cost in KiB.
const M_COST: u32 = 19 * 1024;
/// Iteration count.
const T_COST: u32 = 2;
/// Lanes.
const P_COST: u32 = 1;

/// Handles password hashing and verification using Argon2id with a fixed work factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Result<Self, AppError> {
        let params = Params::new(M_COST, T_COST, P_COST, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a random salt into a PHC string.
    ///
    /// A failure here means the process cannot hash at all and is not retried.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Any problem with the stored hash counts as a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new().unwrap();
        let hash = hasher.hash_password("pw123456").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("pw123456", &hash));
        assert!(!hasher.verify_password("pw1234567", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new().unwrap();
        let a = hasher.hash_password("same-password").unwrap();
        let b = hasher.hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_false() {
        let hasher = PasswordHasher::new().unwrap();
        assert!(!hasher.verify_password("anything", "not-a-phc-string"));
        assert!(!hasher.verify_password("anything", ""));
    }
}
