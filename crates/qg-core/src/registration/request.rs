use serde::{Deserialize, Serialize};

/// Request body for the registration endpoint.
///
/// Built only from a confirmed candidate plus configuration values that the
/// core treats as opaque (event id, manager name). Field names are the wire
/// contract of the scanner backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub user_id: String,
    pub event_id: String,
    pub manager_name: Option<String>,
}

impl SubmissionRequest {
    pub fn new(
        user_id: impl Into<String>,
        event_id: impl Into<String>,
        manager_name: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            event_id: event_id.into(),
            manager_name,
        }
    }
}
