use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;

/// bcrypt only reads this many bytes of input; anything past it would be ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

lazy_static! {
    /// Digest of a throwaway plaintext at the production cost. Login checks
    /// against it when no account matches, so both failure paths pay for one
    /// bcrypt verification.
    static ref DECOY_HASH: Option<String> = hash("decoy-credential", DEFAULT_COST).ok();
}

/// Produces a salted bcrypt digest. Each call draws a fresh salt, so hashing
/// the same plaintext twice yields different strings.
///
/// Passwords longer than [`MAX_PASSWORD_BYTES`] are rejected rather than
/// truncated.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::ValidationError(format!(
            "password: must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::HashingError(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch. Errors only when `hashed_password` is not a
/// well-formed bcrypt digest.
///
/// An over-long password never matches: no stored digest can have come from it.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    verify(password, hashed_password)
        .map_err(|e| AppError::HashingError(format!("Failed to verify password: {}", e)))
}

/// Runs [`hash_password`] on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password_blocking(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::HashingError(format!("Hashing task failed: {}", e)))?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(
    password: &str,
    hashed_password: &str,
) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed_password = hashed_password.to_owned();
    tokio::task::spawn_blocking(move || verify_password(&password, &hashed_password))
        .await
        .map_err(|e| AppError::HashingError(format!("Verification task failed: {}", e)))?
}

/// Spends one verification's worth of work against [`DECOY_HASH`]. The result
/// is discarded.
pub async fn verify_decoy_blocking(password: &str) -> Result<(), AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        if let Some(decoy) = DECOY_HASH.as_deref() {
            let _ = verify_password(&password, decoy);
        }
    })
    .await
    .map_err(|e| AppError::HashingError(format!("Verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same_password").unwrap();
        let second = hash_password("same_password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same_password", &first).unwrap());
        assert!(verify_password("same_password", &second).unwrap());
    }

    #[test]
    fn test_empty_and_unicode_passwords_hash() {
        for password in ["", "pässwörd 🔑"] {
            let hashed = hash_password(password).unwrap();
            assert!(verify_password(password, &hashed).unwrap());
        }
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("test_password123", "invalidhashformat") {
            Err(AppError::HashingError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            other => panic!("Expected a hashing error, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_blocking_wrappers() {
        let hashed = hash_password_blocking("pw1").await.unwrap();
        assert!(verify_password_blocking("pw1", &hashed).await.unwrap());
        assert!(!verify_password_blocking("pw2", &hashed).await.unwrap());
    }

    #[test]
    fn test_over_long_passwords_are_rejected_not_truncated() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);

        assert!(matches!(
            hash_password(&format!("{}correct-suffix", prefix)),
            Err(AppError::ValidationError(_))
        ));

        // A digest of the bare prefix must not accept anything longer.
        let stored = hash_password(&prefix).unwrap();
        assert!(verify_password(&prefix, &stored).unwrap());
        assert!(!verify_password(&format!("{}totally-different", prefix), &stored).unwrap());
    }

    #[test]
    fn test_limit_counts_bytes_not_chars() {
        // 24 three-byte chars fit; 25 do not.
        assert!(hash_password(&"€".repeat(24)).is_ok());
        assert!(matches!(
            hash_password(&"€".repeat(25)),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_decoy_hash_is_a_usable_digest() {
        let decoy = DECOY_HASH.as_deref().expect("decoy digest");
        assert_eq!(verify_password("pw1", decoy), Ok(false));
    }

    #[actix_rt::test]
    async fn test_verify_decoy_blocking() {
        assert_eq!(verify_decoy_blocking("pw1").await, Ok(()));
        assert_eq!(verify_decoy_blocking(&"x".repeat(200)).await, Ok(()));
    }
}
