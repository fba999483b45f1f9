use ember_media::MediaError;
use thiserror::Error;

use crate::creation::CreationError;

/// Failures of one submission attempt. Every variant has already been
/// surfaced as a notice by the time the caller sees it, and the form is
/// left intact for a retry.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("another submission is already in progress")]
    AlreadyInFlight,

    #[error("image upload failed: {0}")]
    ImageUpload(#[source] MediaError),

    #[error("creation call failed: {0}")]
    Creation(#[source] CreationError),

    #[error("{0}")]
    Rejected(String),
}
