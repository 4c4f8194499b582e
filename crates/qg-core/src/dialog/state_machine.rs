//! Confirmation dialog state machine
//!
//! 这个模块实现了扫码确认流程的显式状态机。
//!
//! # Design Principles / 设计原则
//!
//! - **单一对话框**: 同一时刻最多存在一个对话框状态,候选人由状态机独占持有
//! - **守卫不变量**: 只要状态不是 `Idle`,新的解码事件就是 no-op,
//!   防止同一张码的连续解码弹出重复确认框
//! - **可测试**: 纯函数式状态转换 `(state, event) -> (new_state, actions[])`
//!
//! # Architecture / 架构
//!
//! ```text
//! DialogStateMachine (qg-core)
//!   ├── State: Idle / ConfirmPending / Notice
//!   ├── Event: 解码、操作员决定、提交结果
//!   └── Action: 需要应用层执行的副作用 (提交注册)
//!
//! ScanSession (qg-app)
//!   ├── 接收解码/操作员/提交结果输入
//!   ├── 转换为 DialogEvent
//!   ├── 调用状态机获取 actions
//!   └── 执行 actions (异步提交注册)
//! ```
//!
//! Every submission result ends in exactly one dismissible `Notice`; no
//! condition is fatal and the machine performs no retries.

use crate::registration::SubmissionOutcome;
use crate::scan::{evaluate_payload, Candidate, ScanMode};

/// Notice text for an unparseable or unverifiable code.
///
/// Parse failures and authenticity failures render identically; the
/// operator's recovery is the same (rescan).
pub const INVALID_CODE_NOTICE: &str = "invalid code";

/// Notice text for a completed registration.
pub const SUCCESS_NOTICE: &str = "success";

/// Notice text for a duplicate registration rejection.
pub const DUPLICATE_NOTICE: &str = "duplicate registration";

/// The single dialog state owned by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// No dialog open; decode events are accepted.
    Idle,

    /// A candidate is awaiting the operator's accept/reject decision.
    ConfirmPending { candidate: Candidate },

    /// A terminal, dismissible message (success or failure).
    Notice { text: String, is_error: bool },
}

impl DialogState {
    /// Short label for transition logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ConfirmPending { .. } => "confirm_pending",
            Self::Notice { .. } => "notice",
        }
    }
}

/// Inputs that drive the dialog state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// The frame decoder produced a text payload.
    ScanDecoded { payload: String },

    /// The operator accepted the pending candidate.
    OperatorAccepted,

    /// The operator rejected the pending candidate.
    OperatorRejected,

    /// An asynchronous submission finished. Applies regardless of the
    /// current state.
    SubmissionCompleted { outcome: SubmissionOutcome },

    /// The operator dismissed the current notice.
    NoticeDismissed,
}

impl DialogEvent {
    fn label(&self) -> &'static str {
        match self {
            Self::ScanDecoded { .. } => "scan_decoded",
            Self::OperatorAccepted => "operator_accepted",
            Self::OperatorRejected => "operator_rejected",
            Self::SubmissionCompleted { .. } => "submission_completed",
            Self::NoticeDismissed => "notice_dismissed",
        }
    }
}

/// Side effects the application layer must execute for a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// Submit the accepted candidate to the registration backend. The
    /// machine has already returned to `Idle`; it does not wait for the
    /// result.
    SubmitRegistration { user_id: String },
}

/// Per-session parsing policy, fixed at construction.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    pub mode: ScanMode,
    /// Salt for the authenticity prefix. Unused in default mode.
    pub salt: String,
}

/// Confirmation dialog state machine.
///
/// Owns the single current [`DialogState`] and the current candidate.
/// External collaborators never write the state directly; all mutation goes
/// through [`handle_event`](Self::handle_event).
///
/// # Example / 示例
///
/// ```
/// use qg_core::dialog::{DialogEvent, DialogState, DialogStateMachine, ScanPolicy};
/// use qg_core::scan::ScanMode;
///
/// let mut sm = DialogStateMachine::new(ScanPolicy {
///     mode: ScanMode::Default,
///     salt: String::new(),
/// });
/// let (state, _actions) = sm.handle_event(DialogEvent::ScanDecoded {
///     payload: "https://example.com/user/abc123".to_string(),
/// });
/// assert!(matches!(state, DialogState::ConfirmPending { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct DialogStateMachine {
    state: DialogState,
    policy: ScanPolicy,
}

impl DialogStateMachine {
    pub fn new(policy: ScanPolicy) -> Self {
        Self {
            state: DialogState::Idle,
            policy,
        }
    }

    /// Current dialog state.
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// Apply one event and return the new state plus the actions the caller
    /// must execute.
    ///
    /// Invalid (state, event) combinations leave the state untouched and
    /// produce no actions. In particular, `ScanDecoded` is a no-op whenever
    /// a dialog is open; this is the guard that suppresses duplicate
    /// prompts from rapid repeated decodes of the same physical code.
    pub fn handle_event(&mut self, event: DialogEvent) -> (DialogState, Vec<DialogAction>) {
        let old_label = self.state.label();
        let event_label = event.label();

        let actions = self.transition(event);

        tracing::debug!(
            old_state = old_label,
            event = event_label,
            new_state = self.state.label(),
            "dialog transition"
        );

        (self.state.clone(), actions)
    }

    fn transition(&mut self, event: DialogEvent) -> Vec<DialogAction> {
        use DialogEvent::*;

        match (&self.state, event) {
            // A new decode is only processed while no dialog is open.
            (DialogState::Idle, ScanDecoded { payload }) => {
                match evaluate_payload(&payload, self.policy.mode, &self.policy.salt) {
                    Ok(candidate) => {
                        self.state = DialogState::ConfirmPending { candidate };
                    }
                    Err(rejection) => {
                        tracing::debug!(%rejection, "scan rejected");
                        self.state = DialogState::Notice {
                            text: INVALID_CODE_NOTICE.to_string(),
                            is_error: true,
                        };
                    }
                }
                vec![]
            }

            // Acceptance closes the dialog immediately and hands the
            // candidate off for asynchronous submission.
            (DialogState::ConfirmPending { candidate }, OperatorAccepted) => {
                let user_id = candidate.id.clone();
                self.state = DialogState::Idle;
                vec![DialogAction::SubmitRegistration { user_id }]
            }

            (DialogState::ConfirmPending { .. }, OperatorRejected) => {
                self.state = DialogState::Idle;
                vec![]
            }

            // A submission result always lands in a notice, no matter what
            // the dialog shows by then (the operator may already be looking
            // at the next candidate).
            (_, SubmissionCompleted { outcome }) => {
                self.state = match outcome {
                    SubmissionOutcome::Success => DialogState::Notice {
                        text: SUCCESS_NOTICE.to_string(),
                        is_error: false,
                    },
                    SubmissionOutcome::Duplicate => DialogState::Notice {
                        text: DUPLICATE_NOTICE.to_string(),
                        is_error: true,
                    },
                    SubmissionOutcome::Error(reason) => DialogState::Notice {
                        text: format!("registration failed: {reason}"),
                        is_error: true,
                    },
                };
                vec![]
            }

            (DialogState::Notice { .. }, NoticeDismissed) => {
                self.state = DialogState::Idle;
                vec![]
            }

            // Everything else is an illegal transition: repeated decode
            // while a dialog is open, operator input without a dialog,
            // dismissal without a notice.
            (state, event) => {
                tracing::trace!(
                    state = state.label(),
                    event = event.label(),
                    "ignored dialog event"
                );
                vec![]
            }
        }
    }
}
