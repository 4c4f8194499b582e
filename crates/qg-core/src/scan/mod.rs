//! Scan domain: payload extraction and candidate validation.

pub mod candidate;
pub mod mode;
pub mod parser;

pub use candidate::Candidate;
pub use mode::ScanMode;
pub use parser::{evaluate_payload, extract_code, ExtractedCode, ScanRejection};
