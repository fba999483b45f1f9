use async_trait::async_trait;
use ember_types::creation::{CreateTokenRequest, CreateTokenResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreationError {
    #[error("creation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("creation service rejected the call with status {status}")]
    Rejected { status: u16 },
}

/// Boundary to the remote token-creation service. The call is not
/// idempotent; callers must issue it at most once per attempt.
#[async_trait]
pub trait CreationService: Send + Sync + 'static {
    async fn create_token(
        &self,
        request: &CreateTokenRequest,
    ) -> Result<CreateTokenResponse, CreationError>;
}

/// JSON client for the creation endpoint.
pub struct HttpCreationService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCreationService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CreationService for HttpCreationService {
    async fn create_token(
        &self,
        request: &CreateTokenRequest,
    ) -> Result<CreateTokenResponse, CreationError> {
        let url = format!("{}/api/tokens", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(CreationError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<CreateTokenResponse>().await?)
    }
}
