//! Password hashing and verification (Argon2id).
//!
//! Each hash embeds its own random salt and parameters in PHC string format,
//! so verification needs nothing beyond the stored string. Unlike bcrypt
//! there is no 72-byte truncation: the full password participates in the
//! hash. Length bounds (8..=40 characters) are enforced at the API boundary,
//! not here.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns an error only if the hasher itself fails, which does not happen
/// for any well-formed input; callers treat it as an internal fault.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password against a stored hash in constant time.
///
/// Returns `false` for a mismatch and for a malformed stored hash; a corrupt
/// database value must read as "wrong password", never as a crash.
#[must_use]
pub fn verify(password: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hashed = hash("secret123").unwrap();
        assert!(verify("secret123", &hashed));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hashed = hash("secret123").unwrap();
        assert!(!verify("secret124", &hashed));
        assert!(!verify("", &hashed));
    }

    #[test]
    fn salts_are_unique_per_call() {
        let first = hash("secret123").unwrap();
        let second = hash("secret123").unwrap();
        assert_ne!(first, second);
        assert!(verify("secret123", &first));
        assert!(verify("secret123", &second));
    }

    #[test]
    fn malformed_hash_reads_as_mismatch() {
        assert!(!verify("secret123", ""));
        assert!(!verify("secret123", "not-a-phc-string"));
        assert!(!verify("secret123", "$argon2id$v=19$truncated"));
    }
}
