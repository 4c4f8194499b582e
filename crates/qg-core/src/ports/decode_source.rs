use async_trait::async_trait;
use tokio::sync::mpsc;

/// One decode attempt by the frame decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// A frame decoded into a text payload.
    Decoded(String),

    /// The decoder gave up on a frame. Decode failures are not surfaced to
    /// the operator; the session only logs them.
    Failed(String),
}

/// Source of decode events, serialized one at a time.
///
/// Implemented by the hosting shell (camera pipeline, stdin console, test
/// fixture). The session consumes the stream until the sender side closes.
#[async_trait]
pub trait DecodeSourcePort: Send + Sync {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<DecodeEvent>>;
}
