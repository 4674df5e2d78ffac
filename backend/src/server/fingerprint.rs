//! Session key fingerprinting for operational visibility.
//!
//! A truncated SHA-256 fingerprint of the session signing key is logged at
//! startup so operators can tell which key is active without the key
//! material ever reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of the key's signing material, hex encoded.
///
/// Enough for visual distinction in logs without being security-sensitive.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.signing());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
