//! HTTP adapter for the registration backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use qg_core::ports::SubmissionPort;
use qg_core::registration::{ScannerResponse, SubmissionOutcome, SubmissionRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Submits registrations with a single POST per call.
///
/// The backend always answers with a JSON `{ message }` body; outcome
/// classification lives in the domain ([`SubmissionOutcome::classify`]).
/// This adapter only moves bytes and folds every transport problem into an
/// `Error` outcome, so nothing ever propagates past the port boundary.
pub struct HttpRegistrationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRegistrationClient {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn exchange(&self, request: &SubmissionRequest) -> Result<ScannerResponse, reqwest::Error> {
        self.client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .json::<ScannerResponse>()
            .await
    }
}

#[async_trait]
impl SubmissionPort for HttpRegistrationClient {
    async fn submit(&self, request: &SubmissionRequest) -> SubmissionOutcome {
        match self.exchange(request).await {
            Ok(response) => SubmissionOutcome::classify(&response.message),
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "registration request failed");
                SubmissionOutcome::Error(err.to_string())
            }
        }
    }
}
