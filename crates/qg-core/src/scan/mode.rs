use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scan mode selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Plain registration links (`.../user/<id>`).
    Default,
    /// Signed codes carrying an authenticity prefix (`<prefix>/<id>`).
    Secure,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown scan mode: {0} (expected \"default\" or \"secure\")")]
pub struct UnknownScanMode(String);

impl FromStr for ScanMode {
    type Err = UnknownScanMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "secure" => Ok(Self::Secure),
            other => Err(UnknownScanMode(other.to_string())),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Secure => write!(f, "secure"),
        }
    }
}
