use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// The fixed six-stage display sequence shown after the creation call
/// succeeds. Purely cosmetic: it free-runs on its own timer and says
/// nothing about actual backend progress.
pub const LAUNCH_STAGES: [&str; 6] = [
    "Confirming transaction...",
    "Verifying token metadata...",
    "Minting the token",
    "Setting up the bonding curve...",
    "Updating all records",
    "Almost ready...",
];

/// Handle over the free-running stage sequence. The task advances one stage
/// per step and stays on the last one; dropping the handle aborts the task,
/// so teardown never leaks the timer.
pub struct ProgressSequence {
    rx: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl ProgressSequence {
    /// Starts the sequence with the first stage active immediately.
    pub fn start(step: Duration) -> Self {
        let (tx, rx) = watch::channel(0usize);

        let task = tokio::spawn(async move {
            for stage in 1..LAUNCH_STAGES.len() {
                sleep(step).await;
                if tx.send(stage).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// Receiver over the active stage index.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.rx.clone()
    }

    pub fn current_stage(&self) -> usize {
        *self.rx.borrow()
    }
}

impl Drop for ProgressSequence {
    fn drop(&mut self) {
        self.task.abort();
    }
}
