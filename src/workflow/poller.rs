use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::backend::Backend;
use crate::models::ScanSession;

/// Interval between progress fetches while a session is being monitored.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Handle to a running poll loop. Holding it keeps the loop alive; `stop`
/// (or dropping it) cancels the loop on whatever exit path ends monitoring.
pub struct PollerHandle {
    session_id: String,
    cancel: CancellationToken,
    snapshot_rx: watch::Receiver<Option<ScanSession>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The most recent snapshot, if any poll has succeeded yet.
    pub fn latest(&self) -> Option<ScanSession> {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<ScanSession>> {
        self.snapshot_rx.clone()
    }

    /// Cancel the loop and wait for it to wind down. Once this returns, no
    /// further progress fetch will be issued for this session.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start monitoring a session: fetch its progress every `interval` and
/// publish the latest snapshot. Ticks are serialized (the next fetch only
/// starts after the previous one has resolved) and a failed fetch keeps the
/// previous snapshot and retries on the next tick. The loop never inspects
/// `status`: polling continues past `finished`/`failed` until the caller
/// cancels, matching the console's leave-the-view-to-stop behavior.
pub fn start_polling(
    backend: Arc<dyn Backend>,
    session_id: String,
    interval: Duration,
) -> PollerHandle {
    let cancel = CancellationToken::new();
    let (snapshot_tx, snapshot_rx) = watch::channel(None);
    let loop_cancel = cancel.clone();
    let id = session_id.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; swallow that so the first fetch lands
        // one full interval after monitoring starts.
        ticker.tick().await;

        loop {
            tokio::select! {
                // Cancellation wins over an already-elapsed tick so a
                // scheduled-but-unfired tick never fetches after cancel.
                biased;
                _ = loop_cancel.cancelled() => break,
                _ = ticker.tick() => {
                    match backend.fetch_progress(&id).await {
                        Ok(snapshot) => {
                            let _ = snapshot_tx.send(Some(snapshot));
                        }
                        Err(e) => {
                            debug!(session_id = %id, error = %e,
                                "Transient poll failure, keeping previous snapshot");
                        }
                    }
                }
            }
        }
        debug!(session_id = %id, "Progress polling stopped");
    });

    PollerHandle {
        session_id,
        cancel,
        snapshot_rx,
        task,
    }
}
