use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handle returned by a successful scan submission. The backend assigns the
/// id; the console treats it as opaque.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionHandle {
    pub id: String,
}

/// Status of an in-flight or completed session as reported by the backend.
/// Unrecognized strings deserialize as `Unknown` so a newer backend cannot
/// break the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Running,
    Finished,
    Failed,
    #[serde(other)]
    Unknown,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Running => "running",
            SessionStatus::Finished => "finished",
            SessionStatus::Failed => "failed",
            SessionStatus::Unknown => "unknown",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Finished | SessionStatus::Failed)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress snapshot from `GET /api/progress?id=...`. The console never
/// mutates a snapshot; each poll replaces the previous one wholesale.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSession {
    #[serde(default)]
    pub id: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub elapsed_ms: u64,
    /// Tail of the scan log, most-recent-last.
    #[serde(default)]
    pub last_log_lines: Vec<String>,
    pub started_at: Option<DateTime<Utc>>,
    /// Which report artifacts already exist on the backend, when reported.
    #[serde(default)]
    pub reports_exist: HashMap<String, bool>,
}

/// One row of `GET /api/scans`: a known scan and which report artifacts it
/// has produced so far.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanListEntry {
    pub id: String,
    pub dir: Option<String>,
    #[serde(default)]
    pub report_html: bool,
    #[serde(default)]
    pub report_pdf: bool,
    #[serde(default)]
    pub report_json: bool,
}
