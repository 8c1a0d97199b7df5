//! bcrypt password hashing and verification.
//!
//! The salt is generated per hash and embedded in the stored digest, and
//! verification compares without an early exit on length. Both operations
//! are CPU-bound, so they run on the blocking thread pool; async callers
//! only await the result and a UI-facing thread is never stalled.

use alcove_core::error::AuthError;

/// bcrypt work factor. Fixed; balances interactive login latency against
/// offline-attack resistance.
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password. Returns the bcrypt digest string (algorithm,
/// cost, and salt are embedded in it).
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt digest.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch; a malformed
/// digest is an error.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .map_err(|e| AuthError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).await.expect("hashing should succeed");

        // The digest must carry the configured cost factor.
        assert!(
            hash.starts_with("$2") && hash.contains("$10$"),
            "expected a bcrypt digest with cost 10, got {hash}"
        );

        let verified = verify_password(password, &hash)
            .await
            .expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[tokio::test]
    async fn test_wrong_password_fails() {
        let hash = hash_password("real-password")
            .await
            .expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash)
            .await
            .expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[tokio::test]
    async fn test_malformed_digest_is_an_error() {
        let result = verify_password("anything", "not-a-bcrypt-digest").await;
        assert!(result.is_err(), "garbage digest should not verify cleanly");
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same-input").await.unwrap();
        let b = hash_password("same-input").await.unwrap();
        assert_ne!(a, b, "two hashes of the same input must differ by salt");
    }
}
