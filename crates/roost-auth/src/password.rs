use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::AuthError;

/// Hash a plaintext password with Argon2id and a fresh random salt. The
/// plaintext is never stored or logged.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|_| AuthError::Hashing)?;
    Ok(digest.to_string())
}

/// Check a plaintext password against a stored digest. A digest that fails
/// to parse is an internal failure, not a mismatch.
pub fn verify_password(digest: &str, plain: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(digest).map_err(|_| AuthError::Hashing)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_roundtrip() {
        let digest = hash_password("pw1").unwrap();
        assert_ne!(digest, "pw1");
        assert!(verify_password(&digest, "pw1").unwrap());
    }

    #[test]
    fn wrong_password_fails() {
        let digest = hash_password("pw1").unwrap();
        assert!(!verify_password(&digest, "pw2").unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per call.
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_internal_failure() {
        let err = verify_password("not a digest", "pw1").unwrap_err();
        assert!(matches!(err, AuthError::Hashing));
    }
}
