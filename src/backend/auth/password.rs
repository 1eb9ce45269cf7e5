/**
 * Password Hashing and Verification
 *
 * This module wraps bcrypt for credential storage. Hashing salts every call,
 * so two hashes of the same password differ; verification is a pure
 * comparison against the stored hash.
 *
 * # Failure Modes
 *
 * A wrong password is `Ok(false)`, not an error. An `Err` from
 * `verify_password` means the stored hash itself is malformed - a data
 * corruption condition the caller must treat as an internal failure, never
 * as "wrong password".
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password for storage
///
/// Uses bcrypt with `DEFAULT_COST` and a fresh random salt per call.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Verify a plaintext password against a stored hash
///
/// # Returns
///
/// - `Ok(true)` - the password matches
/// - `Ok(false)` - the password does not match
/// - `Err(_)` - the stored hash is malformed (corruption, not a mismatch)
pub fn verify_password(stored_hash: &str, plain: &str) -> Result<bool, BcryptError> {
    verify(plain, stored_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("Secr3t!pass").unwrap();
        assert!(verify_password(&hashed, "Secr3t!pass").unwrap());
        assert!(!verify_password(&hashed, "wrong-password").unwrap());
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let first = hash_password("same-input-12").unwrap();
        let second = hash_password("same-input-12").unwrap();
        assert_ne!(first, second);
        assert!(verify_password(&first, "same-input-12").unwrap());
        assert!(verify_password(&second, "same-input-12").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        // A corrupt stored hash must be distinguishable from a wrong password.
        let result = verify_password("not-a-bcrypt-hash", "whatever");
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hashed = hash_password("visible-secret").unwrap();
        assert!(!hashed.contains("visible-secret"));
    }
}
