use async_trait::async_trait;

use crate::registration::{SubmissionOutcome, SubmissionRequest};

/// Performs one registration exchange with the backend.
///
/// Exactly one network request per call, no internal retry. Implementations
/// never fail past this boundary: transport errors and malformed responses
/// resolve to [`SubmissionOutcome::Error`].
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, request: &SubmissionRequest) -> SubmissionOutcome;
}
