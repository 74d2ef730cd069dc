//! SHA-256 helpers
//!
//! The protocol hashes messages into ring elements, and logs identify ring
//! elements by a short digest of their byte encoding rather than by value.

use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::lattice::RingElement;

/// SHA-256 digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// SHA-256 hash function
#[instrument(level = "trace", skip(data), fields(data_len = data.len()))]
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest of [`RingElement::to_bytes`]
pub fn hash_ring_element(elem: &RingElement) -> [u8; DIGEST_LEN] {
    sha256(&elem.to_bytes())
}

/// First 8 digest bytes as hex, for log lines
pub fn fingerprint(elem: &RingElement) -> String {
    hex::encode(&hash_ring_element(elem)[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(sha256(b"hello world")),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_deterministic() {
        let data = b"blind me";
        assert_eq!(sha256(data), sha256(data));
        assert_ne!(sha256(data), sha256(b"blind me!"));
    }

    #[test]
    fn test_ring_element_fingerprint() {
        let a = RingElement::from_coeffs(vec![1, 2, 3, 4], 17).unwrap();
        let b = RingElement::from_coeffs(vec![1, 2, 3, 5], 17).unwrap();

        assert_eq!(hash_ring_element(&a), sha256(&a.to_bytes()));
        assert_eq!(fingerprint(&a).len(), 16);
        assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}
