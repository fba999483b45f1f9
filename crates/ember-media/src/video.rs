use std::sync::Arc;

use ember_types::media::{FileSummary, MediaFile, UploadState, MAX_VIDEO_BYTES};
use log::{debug, info, warn};
use tokio::sync::{broadcast, Mutex};

use crate::error::MediaError;
use crate::store::MediaStore;

/// Terminal upload announcements, for surfaces that toast on completion.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadEvent {
    Completed { content_address: String },
    Failed { reason: String },
}

struct VideoSession {
    // Bumped on every select and clear. A completion whose generation no
    // longer matches is stale and must not resurrect cleared UI state.
    generation: u64,
    state: UploadState,
    file: Option<FileSummary>,
}

/// Owns the one-at-a-time lifecycle of the optional video attachment,
/// decoupled from form submission: the video is uploaded eagerly on
/// selection, not at submit time. At most one session is live; starting a
/// new upload supersedes the previous one without cancelling its network
/// call.
pub struct VideoUploader<S: MediaStore> {
    store: Arc<S>,
    session: Arc<Mutex<VideoSession>>,
    events_tx: broadcast::Sender<UploadEvent>,
}

impl<S: MediaStore> VideoUploader<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (events_tx, _) = broadcast::channel(16);
        Self {
            store,
            session: Arc::new(Mutex::new(VideoSession {
                generation: 0,
                state: UploadState::Idle,
                file: None,
            })),
            events_tx,
        }
    }

    /// Validate a selected file and start its upload. Drag-and-drop and the
    /// file picker both land here and get identical validation. An
    /// unacceptable file is rejected without touching the current session.
    pub async fn select(&self, file: MediaFile) -> Result<(), MediaError> {
        if file.size() > MAX_VIDEO_BYTES {
            return Err(MediaError::VideoTooLarge);
        }
        if !file.is_video() {
            return Err(MediaError::NotAVideo);
        }

        let generation = {
            let mut session = self.session.lock().await;
            session.generation += 1;
            session.state = UploadState::Uploading;
            session.file = Some(FileSummary::from(&file));
            session.generation
        };

        let store = Arc::clone(&self.store);
        let session = Arc::clone(&self.session);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = store.put_video(&file).await;

            let mut session = session.lock().await;
            if session.generation != generation {
                // The session moved on while this request was in flight.
                debug!("discarding stale upload result (generation {})", generation);
                return;
            }

            match result {
                Ok(content_address) => {
                    info!("video upload finished: {}", content_address);
                    session.state = UploadState::Uploaded {
                        content_address: content_address.clone(),
                    };
                    let _ = events_tx.send(UploadEvent::Completed { content_address });
                }
                Err(err) => {
                    warn!("video upload failed: {}", err);
                    let reason = "Failed to upload video. Please try again.".to_string();
                    session.state = UploadState::Failed {
                        reason: reason.clone(),
                    };
                    // Back to an empty drop zone so the retry starts clean.
                    session.file = None;
                    let _ = events_tx.send(UploadEvent::Failed { reason });
                }
            }
        });

        Ok(())
    }

    /// Reset to `Idle` regardless of current state. Does not cancel an
    /// in-flight request; the generation guard discards its late result.
    pub async fn clear(&self) {
        let mut session = self.session.lock().await;
        session.generation += 1;
        session.state = UploadState::Idle;
        session.file = None;
    }

    pub async fn state(&self) -> UploadState {
        self.session.lock().await.state.clone()
    }

    /// Summary of the currently selected file, if any.
    pub async fn selected_file(&self) -> Option<FileSummary> {
        self.session.lock().await.file.clone()
    }

    /// The uploaded content address, once the session reached `Uploaded`.
    pub async fn content_address(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .state
            .content_address()
            .map(str::to_string)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.events_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use tokio::time::{sleep, Duration};

    enum VideoBehavior {
        Succeed(String),
        Fail,
        // Wait for the notify before succeeding, so tests control when the
        // in-flight request lands.
        Gated(Arc<Notify>, String),
    }

    struct FakeStore {
        video: VideoBehavior,
        video_calls: AtomicUsize,
    }

    impl FakeStore {
        fn new(video: VideoBehavior) -> Arc<Self> {
            Arc::new(Self {
                video,
                video_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MediaStore for FakeStore {
        async fn put_image(&self, _file: &MediaFile) -> Result<String, MediaError> {
            Ok("https://images.example/ref".to_string())
        }

        async fn put_video(&self, _file: &MediaFile) -> Result<String, MediaError> {
            self.video_calls.fetch_add(1, Ordering::SeqCst);
            match &self.video {
                VideoBehavior::Succeed(address) => Ok(address.clone()),
                VideoBehavior::Fail => Err(MediaError::Rejected { status: 500 }),
                VideoBehavior::Gated(gate, address) => {
                    gate.notified().await;
                    Ok(address.clone())
                }
            }
        }
    }

    fn video_file() -> MediaFile {
        MediaFile {
            name: "teaser.mp4".to_string(),
            mime: "video/mp4".to_string(),
            bytes: vec![0u8; 512],
        }
    }

    #[tokio::test]
    async fn oversized_video_is_rejected_without_an_upload() {
        let store = FakeStore::new(VideoBehavior::Fail);
        let uploader = VideoUploader::new(Arc::clone(&store));

        let mut file = video_file();
        file.bytes = vec![0u8; (MAX_VIDEO_BYTES + 1) as usize];

        let err = uploader.select(file).await.unwrap_err();
        assert!(matches!(err, MediaError::VideoTooLarge));
        assert_eq!(uploader.state().await, UploadState::Idle);
        assert_eq!(store.video_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_video_mime_is_rejected_without_an_upload() {
        let store = FakeStore::new(VideoBehavior::Fail);
        let uploader = VideoUploader::new(Arc::clone(&store));

        let mut file = video_file();
        file.mime = "image/gif".to_string();

        let err = uploader.select(file).await.unwrap_err();
        assert!(matches!(err, MediaError::NotAVideo));
        assert_eq!(store.video_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_upload_lands_the_content_address() {
        let store = FakeStore::new(VideoBehavior::Succeed("ipfs://abc".to_string()));
        let uploader = VideoUploader::new(store);
        let mut events = uploader.subscribe();

        uploader.select(video_file()).await.unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            UploadEvent::Completed {
                content_address: "ipfs://abc".to_string()
            }
        );
        assert_eq!(
            uploader.content_address().await.as_deref(),
            Some("ipfs://abc")
        );
        assert!(uploader.selected_file().await.is_some());
    }

    #[tokio::test]
    async fn failed_upload_clears_the_selected_file() {
        let store = FakeStore::new(VideoBehavior::Fail);
        let uploader = VideoUploader::new(store);
        let mut events = uploader.subscribe();

        uploader.select(video_file()).await.unwrap();

        let event = events.recv().await.unwrap();
        assert!(matches!(event, UploadEvent::Failed { .. }));
        assert!(matches!(
            uploader.state().await,
            UploadState::Failed { .. }
        ));
        assert!(uploader.selected_file().await.is_none());
    }

    #[tokio::test]
    async fn late_result_after_clear_is_discarded() {
        let gate = Arc::new(Notify::new());
        let store = FakeStore::new(VideoBehavior::Gated(
            Arc::clone(&gate),
            "ipfs://late".to_string(),
        ));
        let uploader = VideoUploader::new(store);
        let mut events = uploader.subscribe();

        uploader.select(video_file()).await.unwrap();
        assert!(uploader.state().await.is_uploading());

        // Discard the session while the request is still in flight, then let
        // the request land.
        uploader.clear().await;
        gate.notify_one();
        sleep(Duration::from_millis(100)).await;

        assert_eq!(uploader.state().await, UploadState::Idle);
        assert!(uploader.content_address().await.is_none());
        assert!(events.try_recv().is_err());
    }
}
