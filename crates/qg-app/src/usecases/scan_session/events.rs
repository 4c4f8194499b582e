use qg_core::dialog::DialogState;

/// Dialog changes broadcast to hosting shells.
///
/// Emitted once per state change; an ignored input (for example a decode
/// arriving while a dialog is open) produces no event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A candidate awaits the operator's decision.
    ConfirmationRequired { user_id: String },

    /// A terminal notice is showing and must be dismissed.
    NoticePosted { text: String, is_error: bool },

    /// The dialog returned to idle; scanning may resume.
    DialogClosed,
}

impl SessionEvent {
    pub fn from_state(state: &DialogState) -> Self {
        match state {
            DialogState::Idle => Self::DialogClosed,
            DialogState::ConfirmPending { candidate } => Self::ConfirmationRequired {
                user_id: candidate.id.clone(),
            },
            DialogState::Notice { text, is_error } => Self::NoticePosted {
                text: text.clone(),
                is_error: *is_error,
            },
        }
    }
}
