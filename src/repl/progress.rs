use console::style;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::{ScanSession, SessionStatus};
use crate::utils::formatting::format_duration;

/// Owns the background task that mirrors progress snapshots onto the
/// terminal. At most one task runs at a time: respawning aborts the previous
/// task first, so re-entering the progress view never duplicates output or
/// leaks a subscriber.
#[derive(Default)]
pub struct SnapshotPrinter {
    task: Option<JoinHandle<()>>,
}

impl SnapshotPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active task with one that emits a formatted line per
    /// snapshot from `rx`. The task ends on its own when the poller is
    /// cancelled and the channel closes.
    pub fn respawn<F>(&mut self, mut rx: watch::Receiver<Option<ScanSession>>, mut emit: F)
    where
        F: FnMut(String) + Send + 'static,
    {
        self.stop();
        self.task = Some(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow().clone();
                if let Some(snap) = snapshot {
                    emit(format_snapshot_line(&snap));
                }
            }
        }));
    }

    /// Abort the active task, if any.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// One compact live-progress line: status, elapsed time, newest log line.
pub fn format_snapshot_line(snap: &ScanSession) -> String {
    let status = match snap.status {
        SessionStatus::Running => style("running").green().to_string(),
        SessionStatus::Finished => style("finished").cyan().bold().to_string(),
        SessionStatus::Failed => style("failed").red().bold().to_string(),
        other => style(other).white().to_string(),
    };
    let tail = snap.last_log_lines.last().map(|l| l.as_str()).unwrap_or("");
    format!(
        "  {} {} | {} | {}\n",
        style("◦").dim(),
        status,
        format_duration(snap.elapsed_ms),
        style(tail).dim(),
    )
}
