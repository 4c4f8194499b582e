//! Scan session use case: dialog orchestration for one operator.

pub mod events;
pub mod session;

#[cfg(test)]
mod session_flow_test;

pub use events::SessionEvent;
pub use session::ScanSession;
