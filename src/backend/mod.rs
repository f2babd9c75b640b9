pub mod http;

use async_trait::async_trait;

use crate::errors::ConsoleError;
use crate::models::{Catalog, ReportDocument, ScanConfiguration, ScanListEntry, ScanSession, SessionHandle};

pub use http::HttpBackend;

/// Alternate report renderings. Only JSON is ever parsed; the others are
/// surfaced as download links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Html,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Pdf => "pdf",
        }
    }
}

/// The scanning service as seen by the console. Everything behind this trait
/// is an external collaborator; the console only relies on these five reads
/// and one write.
#[async_trait]
pub trait Backend: Send + Sync {
    /// One idempotent read of the server-advertised defaults and enumerations.
    async fn fetch_catalog(&self) -> Result<Catalog, ConsoleError>;

    /// Submit a configuration. Non-2xx is a `Submission` error; the caller
    /// keeps the form active in that case.
    async fn submit_scan(&self, config: &ScanConfiguration) -> Result<SessionHandle, ConsoleError>;

    /// Latest snapshot for a session.
    async fn fetch_progress(&self, session_id: &str) -> Result<ScanSession, ConsoleError>;

    /// The structured report, or `None` while the artifact does not exist
    /// yet. Only transport failures are errors.
    async fn fetch_report(&self, session_id: &str) -> Result<Option<ReportDocument>, ConsoleError>;

    /// Known scans and which report artifacts each has produced.
    async fn list_scans(&self) -> Result<Vec<ScanListEntry>, ConsoleError>;

    /// Link to a report rendering, for display rather than fetching.
    fn report_url(&self, session_id: &str, format: ReportFormat) -> String;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::errors::ConsoleError;
    use crate::models::{
        Catalog, ReportDocument, ScanConfiguration, ScanListEntry, ScanSession, SessionHandle,
        SessionStatus,
    };

    use super::{Backend, ReportFormat};

    /// Scripted in-memory backend for unit tests. Progress polls walk the
    /// `progress` script (the last entry repeats); tick indices listed in
    /// `fail_progress_ticks` return a transient network error instead.
    #[derive(Default)]
    pub(crate) struct StubBackend {
        pub catalog: Catalog,
        pub fail_submission: bool,
        pub report: Option<ReportDocument>,
        pub progress: Vec<ScanSession>,
        pub fail_progress_ticks: HashSet<usize>,
        pub submit_calls: AtomicUsize,
        pub progress_calls: AtomicUsize,
        pub report_calls: AtomicUsize,
        pub submitted: Mutex<Vec<ScanConfiguration>>,
    }

    pub(crate) fn snapshot(status: SessionStatus, lines: &[&str]) -> ScanSession {
        ScanSession {
            id: "stub-1".into(),
            status,
            elapsed_ms: 1000,
            last_log_lines: lines.iter().map(|s| s.to_string()).collect(),
            started_at: None,
            reports_exist: Default::default(),
        }
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn fetch_catalog(&self) -> Result<Catalog, ConsoleError> {
            Ok(self.catalog.clone())
        }

        async fn submit_scan(
            &self,
            config: &ScanConfiguration,
        ) -> Result<SessionHandle, ConsoleError> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            self.submitted.lock().unwrap().push(config.clone());
            if self.fail_submission {
                return Err(ConsoleError::Submission("HTTP 500: boom".into()));
            }
            Ok(SessionHandle { id: "stub-1".into() })
        }

        async fn fetch_progress(&self, session_id: &str) -> Result<ScanSession, ConsoleError> {
            let tick = self.progress_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_progress_ticks.contains(&tick) {
                return Err(ConsoleError::Network("connection reset".into()));
            }
            let mut snap = match self.progress.get(tick).or(self.progress.last()) {
                Some(s) => s.clone(),
                None => snapshot(SessionStatus::Running, &[]),
            };
            snap.id = session_id.to_string();
            Ok(snap)
        }

        async fn fetch_report(
            &self,
            _session_id: &str,
        ) -> Result<Option<ReportDocument>, ConsoleError> {
            self.report_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.report.clone())
        }

        async fn list_scans(&self) -> Result<Vec<ScanListEntry>, ConsoleError> {
            Ok(Vec::new())
        }

        fn report_url(&self, session_id: &str, format: ReportFormat) -> String {
            format!("stub:///api/report/{}/{}", session_id, format.as_str())
        }
    }
}
