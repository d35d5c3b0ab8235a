//! Signing key fingerprints for operational visibility.
//!
//! Operators compare the fingerprint logged at startup to confirm which key
//! is active without the key material ever reaching the logs.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 of `key` as 16 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use complaints::inbound::http::token_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&[b'k'; 32]);
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
