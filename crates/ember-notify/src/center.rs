use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc::{channel, Sender};
use tokio::sync::{broadcast, Mutex};

use crate::notice::{Notice, NoticeLevel};

// Capped so an idle surface never accumulates unbounded toast history.
const RECENT_CAP: usize = 100;

/// Fan-out point for user-facing notices. Posting is fire-and-forget from
/// anywhere in the pipeline; a background task keeps a capped in-memory
/// buffer so a surface can render recent notices without having subscribed
/// from the start, and broadcasts each notice to every live subscriber.
#[derive(Clone, Debug)]
pub struct NotificationCenter {
    sender: Sender<Notice>,
    recent: Arc<Mutex<Vec<Notice>>>,
    broadcast_tx: broadcast::Sender<Notice>,
}

impl NotificationCenter {
    /// Creates the center and spawns its fan-out task. Requires a running
    /// tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = channel::<Notice>(256);
        let recent = Arc::new(Mutex::new(Vec::new()));
        let recent_clone = Arc::clone(&recent);

        let (broadcast_tx, _) = broadcast::channel(256);
        let broadcast_tx_clone = broadcast_tx.clone();

        tokio::spawn(async move {
            while let Some(notice) = receiver.recv().await {
                let mut recent = recent_clone.lock().await;
                recent.push(notice.clone());
                if recent.len() > RECENT_CAP {
                    recent.remove(0);
                }
                drop(recent);

                let _ = broadcast_tx_clone.send(notice);
            }
        });

        Self {
            sender,
            recent,
            broadcast_tx,
        }
    }

    pub async fn post(&self, level: NoticeLevel, title: &str, body: &str) {
        let notice = Notice {
            at: Utc::now(),
            level,
            title: title.to_string(),
            body: body.to_string(),
        };
        let _ = self.sender.send(notice).await;
    }

    pub async fn info(&self, title: &str, body: &str) {
        self.post(NoticeLevel::Info, title, body).await;
    }

    pub async fn success(&self, title: &str, body: &str) {
        self.post(NoticeLevel::Success, title, body).await;
    }

    pub async fn error(&self, title: &str, body: &str) {
        self.post(NoticeLevel::Error, title, body).await;
    }

    /// Subscribe to notices as they are posted.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.broadcast_tx.subscribe()
    }

    /// The capped buffer of recent notices.
    pub async fn recent(&self) -> Vec<Notice> {
        self.recent.lock().await.clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
