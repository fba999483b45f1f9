use std::sync::Arc;

use chrono::Utc;
use ember_curve::CurveParams;
use ember_forms::{validate, TokenForm, ValidationReport};
use ember_media::MediaStore;
use ember_notify::NotificationCenter;
use ember_types::creation::{
    AttachmentKind, CreateTokenRequest, LiveStatusSnapshot, StreamThumbnail, TokenMetadata,
};
use ember_types::submission::{LaunchEvent, SubmissionState};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, instrument, warn};

use crate::creation::CreationService;
use crate::error::LaunchError;
use crate::progress::ProgressSequence;

/// Timings of the cosmetic tail of a successful submission.
#[derive(Clone, Copy, Debug)]
pub struct LaunchTimings {
    /// How long each progress stage stays active.
    pub progress_step: Duration,
    /// Delay between creation success and the redirect event.
    pub redirect_delay: Duration,
}

impl Default for LaunchTimings {
    fn default() -> Self {
        Self {
            progress_step: Duration::from_millis(800),
            redirect_delay: Duration::from_secs(5),
        }
    }
}

impl LaunchTimings {
    pub fn from_millis(progress_step_ms: u64, redirect_delay_ms: u64) -> Self {
        Self {
            progress_step: Duration::from_millis(progress_step_ms),
            redirect_delay: Duration::from_millis(redirect_delay_ms),
        }
    }
}

/// What one submit attempt resolved to when it did not fail outright.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// Validation rejected the form; the report carries the field messages.
    Rejected(ValidationReport),
    /// The creation service accepted the request.
    Created { token_id: Option<String> },
}

/// The submission orchestrator. Owns the explicit attempt state machine and
/// sequences validation, image upload, curve quote and the single creation
/// call. Every remote failure is caught here and converted to a notice; the
/// form is never touched, so a failed attempt can be retried as-is.
pub struct Launcher<M: MediaStore, C: CreationService> {
    media: Arc<M>,
    creation: Arc<C>,
    curve: CurveParams,
    timings: LaunchTimings,
    notices: NotificationCenter,
    state_tx: watch::Sender<SubmissionState>,
    events_tx: broadcast::Sender<LaunchEvent>,
    progress: Mutex<Option<ProgressSequence>>,
}

impl<M: MediaStore, C: CreationService> Launcher<M, C> {
    pub fn new(
        media: Arc<M>,
        creation: Arc<C>,
        curve: CurveParams,
        timings: LaunchTimings,
        notices: NotificationCenter,
    ) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        let (events_tx, _) = broadcast::channel(16);

        Self {
            media,
            creation,
            curve,
            timings,
            notices,
            state_tx,
            events_tx,
            progress: Mutex::new(None),
        }
    }

    /// Receiver over the attempt state, for driving the submit control and
    /// any progress surface.
    pub fn state(&self) -> watch::Receiver<SubmissionState> {
        self.state_tx.subscribe()
    }

    /// Events the embedding surface acts on, currently the delayed redirect.
    pub fn events(&self) -> broadcast::Receiver<LaunchEvent> {
        self.events_tx.subscribe()
    }

    /// Index of the active cosmetic progress stage, once one is running.
    pub async fn progress_stage(&self) -> Option<usize> {
        self.progress
            .lock()
            .await
            .as_ref()
            .map(ProgressSequence::current_stage)
    }

    /// Tear the attempt down: back to `Idle`, progress sequence dropped
    /// (which aborts its timer task).
    pub async fn reset(&self) {
        self.progress.lock().await.take();
        self.state_tx.send_replace(SubmissionState::Idle);
    }

    /// Run one submission attempt over the current form.
    ///
    /// Exactly one attempt may be active at a time; a second call while one
    /// is in flight returns [`LaunchError::AlreadyInFlight`] without side
    /// effects.
    #[instrument(skip_all, fields(symbol = %form.symbol))]
    pub async fn submit(&self, form: &TokenForm) -> Result<LaunchOutcome, LaunchError> {
        // Claim the pipeline atomically so rapid repeated submits cannot
        // race into duplicate creation calls.
        let mut claimed = false;
        self.state_tx.send_if_modified(|state| {
            if state.is_in_flight() {
                return false;
            }
            *state = SubmissionState::Validating;
            claimed = true;
            true
        });
        if !claimed {
            return Err(LaunchError::AlreadyInFlight);
        }

        let report = validate(form);
        if !report.is_clean() {
            debug!("validation rejected fields {:?}", report.offending_fields());
            self.state_tx.send_replace(SubmissionState::Idle);
            return Ok(LaunchOutcome::Rejected(report));
        }

        // Re-check the first-buy numerics even though the validator covers
        // them; toggling can leave stale text behind its back.
        if form.first_buy_enabled && !(parses_positive(&form.buy_amount) && parses_positive(&form.max_base_cost)) {
            self.state_tx.send_replace(SubmissionState::Idle);
            return Ok(LaunchOutcome::Rejected(validate(form)));
        }

        let image = match form.image.as_ref() {
            Some(image) => image,
            // The validator flags a missing image, so this arm is
            // unreachable in practice.
            None => {
                self.state_tx.send_replace(SubmissionState::Idle);
                return Ok(LaunchOutcome::Rejected(validate(form)));
            }
        };

        self.state_tx.send_replace(SubmissionState::UploadingImage);
        let image_url = match self.media.put_image(image).await {
            Ok(url) => url,
            Err(err) => {
                error!("image upload failed: {}", err);
                self.notices.error("Error", "Failed to create token").await;
                self.state_tx.send_replace(SubmissionState::Idle);
                return Err(LaunchError::ImageUpload(err));
            }
        };

        self.state_tx.send_replace(SubmissionState::ComputingCurve);
        let quote = form.first_buy_quote(&self.curve);
        debug!(
            "first buy quote: {} tokens, ceiling {}",
            quote.token_out, quote.max_base_cost
        );

        self.state_tx.send_replace(SubmissionState::Creating);
        let request = self.build_request(form, image_url, quote.token_out, quote.max_base_cost);

        // A single call; never retried, to avoid creating the token twice.
        let response = match self.creation.create_token(&request).await {
            Ok(response) => response,
            Err(err) => {
                error!("creation call failed: {}", err);
                self.notices.error("Error", "Failed to create token").await;
                self.state_tx.send_replace(SubmissionState::Idle);
                return Err(LaunchError::Creation(err));
            }
        };

        if !response.success {
            let reason = response
                .error
                .unwrap_or_else(|| "Failed to create token".to_string());
            warn!("creation rejected: {}", reason);
            self.notices.error("Error", &reason).await;
            self.state_tx.send_replace(SubmissionState::Idle);
            return Err(LaunchError::Rejected(reason));
        }

        info!("token created, id {:?}", response.token_id);
        self.notices
            .success("Success!", "Your token has been created successfully.")
            .await;

        let token_id = response.token_id.clone();
        self.state_tx.send_replace(SubmissionState::Succeeding {
            token_id: token_id.clone(),
        });

        // Cosmetic stage display; free-runs regardless of anything real.
        *self.progress.lock().await = Some(ProgressSequence::start(self.timings.progress_step));

        // The service does not always return an identifier; without one
        // there is nowhere to redirect to.
        if let Some(token_id) = token_id.clone() {
            let events_tx = self.events_tx.clone();
            let delay = self.timings.redirect_delay;
            tokio::spawn(async move {
                sleep(delay).await;
                let _ = events_tx.send(LaunchEvent::Redirect { token_id });
            });
        }

        Ok(LaunchOutcome::Created { token_id })
    }

    fn build_request(
        &self,
        form: &TokenForm,
        image_url: String,
        token_amount: u64,
        max_base_cost: u64,
    ) -> CreateTokenRequest {
        let display_name = form
            .stream
            .user_name
            .clone()
            .unwrap_or_else(|| form.name.clone());

        CreateTokenRequest {
            name: form.name.clone(),
            symbol: form.symbol.clone(),
            image_url,
            description: form.description.clone(),
            display_name,
            stream_link: form.stream.link.clone(),
            created_at: Utc::now(),
            metadata: TokenMetadata {
                title: form.stream.title.clone(),
                user_id: form.stream.user_id.clone(),
                thumbnail_url: form.stream.preview_url.clone(),
                streamer_profile_picture: form.stream.profile_image_url.clone(),
                full_status: LiveStatusSnapshot {
                    live: true,
                    stream: StreamThumbnail {
                        thumbnail_url: form.stream.preview_url.clone(),
                    },
                },
                social_links: form.social_links.clone(),
                video_link: form.video_address.clone().unwrap_or_default(),
            },
            first_buy: form.first_buy_enabled,
            token_amount,
            max_base_cost,
            stream_user_id: form.stream.user_id.clone(),
            attachment: if form.stream_enabled {
                AttachmentKind::Twitch
            } else {
                AttachmentKind::None
            },
        }
    }
}

fn parses_positive(value: &str) -> bool {
    matches!(value.trim().parse::<f64>(), Ok(v) if v.is_finite() && v > 0.0)
}
