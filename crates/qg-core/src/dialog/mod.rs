//! Confirmation dialog domain models and state machine.

pub mod state_machine;

pub use state_machine::{
    DialogAction, DialogEvent, DialogState, DialogStateMachine, ScanPolicy,
};
