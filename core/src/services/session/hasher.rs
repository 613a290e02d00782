//! Token hashing and raw-token generation

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of generated raw refresh tokens
const RAW_TOKEN_LENGTH: usize = 48;

/// Hashes a raw token for storage
///
/// Deterministic one-way transform; the hex digest is the only form of the
/// credential that is ever persisted or compared.
pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a cryptographically random raw token string
pub(crate) fn generate_raw_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RAW_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_is_deterministic() {
        let token = "test_refresh_token";

        let hashes: Vec<String> = (0..10).map(|_| hash_token(token)).collect();
        for hash in &hashes[1..] {
            assert_eq!(&hashes[0], hash);
        }
    }

    #[test]
    fn test_different_inputs_differ() {
        assert_ne!(hash_token("token_value_1"), hash_token("token_value_2"));
    }

    #[test]
    fn test_digest_shape() {
        let hash = hash_token("some-raw-token");

        // SHA-256 in hex
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        // The digest must not leak the raw value
        assert!(!hash.contains("some-raw-token"));
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = generate_raw_token();
        let b = generate_raw_token();

        assert_eq!(a.len(), RAW_TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
