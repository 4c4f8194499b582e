//! Scanner configuration domain model

use serde::{Deserialize, Serialize};

use crate::scan::ScanMode;

/// Configuration for one scanning session.
///
/// Read once at startup by the hosting shell and passed to the session as
/// opaque constructor arguments; the core never re-reads or validates these
/// values beyond their types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Scan mode (plain links or signed codes).
    pub mode: ScanMode,

    /// Salt for the authenticity prefix, defaulting to the literal `salt`.
    /// Unused in default mode.
    pub salt: String,

    /// Event this scanner registers participants for.
    pub event_id: String,

    /// Operator display name attached to each registration, if any.
    pub manager_name: Option<String>,

    /// Registration endpoint URL.
    pub endpoint: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            mode: ScanMode::Default,
            salt: "salt".to_string(),
            event_id: "default".to_string(),
            manager_name: None,
            endpoint: "http://localhost:8080/scan".to_string(),
        }
    }
}
