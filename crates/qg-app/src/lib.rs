//! # qg-app
//!
//! Application layer for qrgate: use cases that wire decode events,
//! operator input, and the submission backend into the dialog state machine.

pub mod usecases;

pub use usecases::scan_session::{ScanSession, SessionEvent};
