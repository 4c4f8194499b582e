//! Scan payload parser
//!
//! Extracts a candidate user id (and, in secure mode, an authenticity
//! prefix) from the raw text of a decoded QR frame.
//!
//! Payloads are opaque strings; a typical plain code is a profile link such
//! as `https://example.com/user/abc123`, a signed code is `e5/abc123`.
//! When a payload contains several matching substrings, only the **last**
//! one determines the result. Earlier matches are silently discarded, not
//! merged or reported as ambiguous. Scanners aiming at stacked badges
//! depend on this, so the parser folds the full match sequence to its last
//! element instead of stopping at the first hit.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::crypto::code_prefix;
use crate::scan::{Candidate, ScanMode};

// 使用 lazy_static 初始化正则表达式，避免每次解析时都重新编译
lazy_static! {
    /// Plain registration link pattern: a `/user/` path segment followed
    /// by a lowercase-alphanumeric id. The leading slash is required, so
    /// substrings like `mouser/abc` never count as a code.
    static ref USER_CODE_REGEX: Regex = Regex::new(r"/user/([a-z0-9]+)").unwrap();

    /// Signed code pattern: two-character authenticity prefix, `/`, rest.
    static ref SIGNED_CODE_REGEX: Regex = Regex::new(r"([a-z0-9]{2})/(.+)").unwrap();
}

/// Raw extraction result, before any authenticity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCode {
    pub user_id: String,
    /// Present only for secure-mode payloads.
    pub auth_prefix: Option<String>,
}

/// Why a decoded payload was rejected.
///
/// Both variants are operator-indistinguishable (rendered as the same
/// "invalid code" notice) and recoverable by rescanning.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanRejection {
    #[error("payload does not contain a registration code")]
    ParseFailure,

    #[error("authenticity prefix mismatch")]
    AuthenticityFailure,
}

/// Extract the candidate code from a raw payload, if any.
pub fn extract_code(raw: &str, mode: ScanMode) -> Option<ExtractedCode> {
    match mode {
        ScanMode::Default => USER_CODE_REGEX
            .captures_iter(raw)
            .last()
            .map(|caps| ExtractedCode {
                user_id: caps[1].to_string(),
                auth_prefix: None,
            }),
        ScanMode::Secure => SIGNED_CODE_REGEX
            .captures_iter(raw)
            .last()
            .map(|caps| ExtractedCode {
                user_id: caps[2].to_string(),
                auth_prefix: Some(caps[1].to_string()),
            }),
    }
}

/// Parse a payload and, in secure mode, verify its authenticity prefix.
pub fn evaluate_payload(raw: &str, mode: ScanMode, salt: &str) -> Result<Candidate, ScanRejection> {
    let code = extract_code(raw, mode).ok_or(ScanRejection::ParseFailure)?;

    if let Some(prefix) = &code.auth_prefix {
        if !code_prefix::verify(&code.user_id, prefix, salt) {
            return Err(ScanRejection::AuthenticityFailure);
        }
    }

    Ok(Candidate::new(code.user_id))
}
