//! ember-launch crate
//!
//! The submission orchestrator: validation, image upload, curve quote,
//! creation call, staged progress and redirect.

pub mod creation;
pub mod error;
pub mod launcher;
pub mod progress;

pub use creation::{CreationError, CreationService, HttpCreationService};
pub use error::LaunchError;
pub use launcher::{LaunchOutcome, LaunchTimings, Launcher};
pub use progress::{ProgressSequence, LAUNCH_STAGES};
