use serde::{Deserialize, Serialize};

/// A provisionally extracted user identifier awaiting operator confirmation.
///
/// A candidate is created per decode event and discarded when the dialog
/// returns to idle. It is not guaranteed unique or well-formed beyond
/// matching the extraction pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
