use async_trait::async_trait;
use ember_types::media::MediaFile;

use crate::error::MediaError;

/// Boundary to the external storage endpoints. The orchestrator and the
/// video coordinator only see this trait; the HTTP implementation lives in
/// [`crate::http`].
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Upload the token image. Success returns the stable reference URL
    /// embedded into the creation request.
    async fn put_image(&self, file: &MediaFile) -> Result<String, MediaError>;

    /// Upload a video. Success returns the content address used to retrieve
    /// it later.
    async fn put_video(&self, file: &MediaFile) -> Result<String, MediaError>;
}
