use thiserror::Error;

/// Errors surfaced by the media layer. The first two are input errors,
/// detected locally before any network activity; the rest come back from
/// the storage endpoints.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Video must be less than 100MB")]
    VideoTooLarge,

    #[error("Please select a valid video file")]
    NotAVideo,

    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage endpoint rejected the upload with status {status}")]
    Rejected { status: u16 },
}
