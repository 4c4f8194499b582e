use serde::{Deserialize, Serialize};

/// Response body of the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerResponse {
    pub message: String,
}

/// Classified result of one registration exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Backend accepted the registration.
    Success,
    /// Backend rejected the user as already registered for this event.
    Duplicate,
    /// Any other rejection or a transport-level failure.
    Error(String),
}

impl SubmissionOutcome {
    /// Classify a well-formed backend response by its `message` field.
    ///
    /// The duplicate case matches on substring: the backend forwards its
    /// database's unique-constraint message verbatim ("duplicate key value
    /// violates unique constraint"), and only the word is stable across
    /// backend versions.
    pub fn classify(message: &str) -> Self {
        if message == "ok" {
            Self::Success
        } else if message.contains("duplicate") {
            Self::Duplicate
        } else {
            Self::Error(message.to_string())
        }
    }
}
