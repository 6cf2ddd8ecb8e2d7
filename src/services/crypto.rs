use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::InternalError;

/// Derive a salted Argon2id hash for storage. The plaintext is write-only:
/// nothing ever reads it back out of the hash.
pub fn hash_password(plaintext: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::PasswordHash(e.to_string()))
}

/// One-way comparison. A malformed stored hash verifies as false rather
/// than erroring; the caller treats it like a wrong password.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("cat-dog-fish").unwrap();
        assert!(verify_password("cat-dog-fish", &hash));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("cat-dog-fish").unwrap();
        assert!(!verify_password("cat-dog-bird", &hash));
    }

    #[test]
    fn hash_is_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
