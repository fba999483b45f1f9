use async_trait::async_trait;
use ember_types::stream::CreatorStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamLookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup endpoint rejected the request with status {status}")]
    Rejected { status: u16 },
}

/// Boundary to the external stream-status provider. Looking a stream up is
/// an explicit user action; it is never part of form validation.
#[async_trait]
pub trait StreamLookup: Send + Sync + 'static {
    /// Resolve the creator behind a stream URL and whether they are live.
    async fn creator_status(&self, stream_url: &str)
        -> Result<CreatorStatus, StreamLookupError>;
}
