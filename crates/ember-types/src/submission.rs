use serde::{Deserialize, Serialize};

/// Explicit state of one submission attempt. An attempt exists from the
/// submit action through to terminal success or failure; failures return the
/// pipeline to `Idle` with the form left intact.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SubmissionState {
    /// No attempt in progress; the form is editable and submittable.
    #[default]
    Idle,

    /// Running the field validator. No network activity has happened yet.
    Validating,

    /// Uploading the token image to the image store.
    UploadingImage,

    /// Deriving the first-buy quote from the bonding curve.
    ComputingCurve,

    /// The creation call is in flight. It is made exactly once.
    Creating,

    /// The creation service accepted the request. The cosmetic progress
    /// sequence is running and a redirect event follows after a fixed delay.
    Succeeding { token_id: Option<String> },
}

impl SubmissionState {
    /// Whether an attempt currently owns the pipeline. The submit control
    /// stays disabled while this is true to prevent duplicate creation
    /// calls.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating
                | SubmissionState::UploadingImage
                | SubmissionState::ComputingCurve
                | SubmissionState::Creating
        )
    }
}

/// Events emitted by the launcher for the embedding surface to act on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LaunchEvent {
    /// Navigate to the newly created token's page.
    Redirect { token_id: String },
}
