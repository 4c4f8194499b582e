//! Port interfaces for the application layer
//!
//! Ports define the contract between the scan-session logic and
//! infrastructure implementations, keeping the core independent of the
//! decoder hardware and the HTTP stack. The frame decoder in particular is
//! injected as a capability so the session can be driven by a synthetic
//! event source in tests.

pub mod decode_source;
pub mod submission;

pub use decode_source::{DecodeEvent, DecodeSourcePort};
pub use submission::SubmissionPort;
