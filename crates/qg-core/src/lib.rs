//! # qg-core
//!
//! Core domain models and business logic for qrgate.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod crypto;
pub mod dialog;
pub mod ports;
pub mod registration;
pub mod scan;

// Re-export commonly used types at the crate root
pub use config::ScannerConfig;
pub use dialog::{DialogAction, DialogEvent, DialogState, DialogStateMachine};
pub use registration::{SubmissionOutcome, SubmissionRequest};
pub use scan::{Candidate, ScanMode};
