//! Authenticity prefix for signed scan codes
//!
//! A signed code carries the first two lowercase-hex characters of
//! `MD5(user_id + salt)` in front of the user id. The check only proves the
//! code was produced by someone holding the salt; with 256 possible prefix
//! values it is a tamper deterrent, not a signature. The width is part of
//! the deployed code format and must not be changed unilaterally.
//!
//! Pure and deterministic, no IO.

use md5::{Digest, Md5};

/// Number of hex characters carried in front of a signed code.
pub const PREFIX_LEN: usize = 2;

/// Compute the expected authenticity prefix for a user id under `salt`.
pub fn expected(user_id: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(user_id.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..PREFIX_LEN].to_string()
}

/// Verify the prefix extracted from a scanned code.
///
/// Exact case-sensitive comparison; the digest is rendered lowercase, so an
/// uppercase prefix never verifies.
pub fn verify(user_id: &str, prefix: &str, salt: &str) -> bool {
    expected(user_id, salt) == prefix
}
