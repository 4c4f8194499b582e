//! Registration protocol models and outcome classification.

pub mod outcome;
pub mod request;

pub use outcome::{ScannerResponse, SubmissionOutcome};
pub use request::SubmissionRequest;
