use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::backend::Backend;
use crate::errors::ConsoleError;
use crate::models::{Catalog, ConfigField, ScanConfiguration, ScanSession, SessionHandle};

use super::controller;
use super::poller::{start_polling, PollerHandle, POLL_INTERVAL};
use super::report_view::{self, ReportView};

/// The four mutually exclusive console views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Scan,
    Progress,
    Report,
    Help,
}

impl Tab {
    pub fn parse(name: &str) -> Option<Tab> {
        match name {
            "scan" => Some(Tab::Scan),
            "progress" => Some(Tab::Progress),
            "report" => Some(Tab::Report),
            "help" => Some(Tab::Help),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Scan => "scan",
            Tab::Progress => "progress",
            Tab::Report => "report",
            Tab::Help => "help",
        }
    }
}

/// Console-wide session context: the active tab, the form being edited, the
/// catalog it was seeded from, and the session currently being monitored.
/// The progress poller's lifecycle is owned here: it runs exactly when the
/// progress tab is active with a known session id, and every path that
/// leaves that state stops it.
pub struct ConsoleContext {
    backend: Arc<dyn Backend>,
    tab: Tab,
    catalog: Option<Catalog>,
    form: Option<ScanConfiguration>,
    session_id: Option<String>,
    poller: Option<PollerHandle>,
    poll_interval: Duration,
}

impl ConsoleContext {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            tab: Tab::Scan,
            catalog: None,
            form: None,
            session_id: None,
            poller: None,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn form(&self) -> Option<&ScanConfiguration> {
        self.form.as_ref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Fetch the catalog and seed the form from it. On failure the form
    /// stays unpopulated: enum fields must never carry guessed values.
    pub async fn load_catalog(&mut self) -> Result<(), ConsoleError> {
        let catalog = self.backend.fetch_catalog().await?;
        self.form = Some(ScanConfiguration::initialize(&catalog));
        self.catalog = Some(catalog);
        Ok(())
    }

    /// Apply one form edit by wire field name.
    pub fn edit_field(&mut self, name: &str, raw: &str) -> Result<(), ConsoleError> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| ConsoleError::Catalog("catalog not loaded".into()))?;
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| ConsoleError::Catalog("form not initialized".into()))?;
        *form = form.set_field(ConfigField::parse(name)?, raw, catalog)?;
        Ok(())
    }

    /// Submit the current form. On success the new session becomes the
    /// monitored one; the caller decides whether to switch to the progress
    /// tab. The form stays as-is and remains editable.
    pub async fn start_scan(&mut self) -> Result<SessionHandle, ConsoleError> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| ConsoleError::Catalog("form not initialized".into()))?;
        let handle = controller::start_scan(self.backend.as_ref(), form).await?;
        self.set_session(Some(handle.id.clone())).await;
        Ok(handle)
    }

    pub async fn switch_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            debug!(from = self.tab.as_str(), to = tab.as_str(), "Switching tab");
        }
        self.tab = tab;
        self.sync_poller().await;
    }

    /// Point the console at a different session (or none). Restarts or stops
    /// the poller as needed.
    pub async fn set_session(&mut self, id: Option<String>) {
        self.session_id = id;
        self.sync_poller().await;
    }

    /// Latest progress snapshot, if monitoring has delivered one.
    pub fn latest_snapshot(&self) -> Option<ScanSession> {
        self.poller.as_ref().and_then(|p| p.latest())
    }

    /// Observe snapshots as the poller publishes them. `None` when the
    /// progress view is not active.
    pub fn subscribe_progress(&self) -> Option<watch::Receiver<Option<ScanSession>>> {
        self.poller.as_ref().map(|p| p.subscribe())
    }

    /// Fetch the report for the monitored session. `Ok(None)` is the neutral
    /// no-active-scan state and performs no fetch.
    pub async fn load_report(&self) -> Result<Option<ReportView>, ConsoleError> {
        match &self.session_id {
            Some(id) => Ok(Some(
                report_view::load_report(self.backend.as_ref(), id).await?,
            )),
            None => Ok(None),
        }
    }

    /// Stop monitoring unconditionally. Used on console shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    /// Reconcile the poller with the (tab, session id) pair: running exactly
    /// when the progress tab is active on a known session, and restarted
    /// whenever the session id changes underneath it.
    async fn sync_poller(&mut self) {
        let wanted = match (self.tab, &self.session_id) {
            (Tab::Progress, Some(id)) => Some(id.clone()),
            _ => None,
        };
        let current = self.poller.as_ref().map(|p| p.session_id().to_string());
        if wanted == current {
            return;
        }
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
        if let Some(id) = wanted {
            self.poller = Some(start_polling(self.backend.clone(), id, self.poll_interval));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::backend::testing::StubBackend;

    const TICK: Duration = Duration::from_millis(20);

    fn context(backend: Arc<StubBackend>) -> ConsoleContext {
        ConsoleContext::new(backend).with_poll_interval(TICK)
    }

    #[tokio::test]
    async fn test_entering_progress_starts_polling_and_leaving_stops_it() {
        let backend = Arc::new(StubBackend::default());
        let mut ctx = context(backend.clone());
        ctx.set_session(Some("s-1".into())).await;
        assert!(!ctx.is_polling());

        ctx.switch_tab(Tab::Progress).await;
        assert!(ctx.is_polling());
        let mut rx = ctx.subscribe_progress().unwrap();
        rx.changed().await.unwrap();

        ctx.switch_tab(Tab::Scan).await;
        assert!(!ctx.is_polling());
        let calls = backend.progress_calls.load(Ordering::SeqCst);
        tokio::time::sleep(TICK * 5).await;
        assert_eq!(backend.progress_calls.load(Ordering::SeqCst), calls);
    }

    #[tokio::test]
    async fn test_progress_without_session_does_not_poll() {
        let backend = Arc::new(StubBackend::default());
        let mut ctx = context(backend.clone());
        ctx.switch_tab(Tab::Progress).await;
        assert!(!ctx.is_polling());
        tokio::time::sleep(TICK * 3).await;
        assert_eq!(backend.progress_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_session_change_restarts_the_poller() {
        let backend = Arc::new(StubBackend::default());
        let mut ctx = context(backend.clone());
        ctx.set_session(Some("s-1".into())).await;
        ctx.switch_tab(Tab::Progress).await;
        let mut rx = ctx.subscribe_progress().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().clone().unwrap().id, "s-1");

        ctx.set_session(Some("s-2".into())).await;
        assert!(ctx.is_polling());
        let mut rx = ctx.subscribe_progress().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().clone().unwrap().id, "s-2");
    }

    #[tokio::test]
    async fn test_report_without_session_is_neutral_and_fetch_free() {
        let backend = Arc::new(StubBackend::default());
        let mut ctx = context(backend.clone());
        ctx.switch_tab(Tab::Report).await;

        let view = ctx.load_report().await.unwrap();
        assert!(view.is_none());
        assert_eq!(backend.report_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_catalog_failure_leaves_form_unpopulated() {
        // A backend whose catalog read fails outright.
        struct DownBackend;
        #[async_trait::async_trait]
        impl crate::backend::Backend for DownBackend {
            async fn fetch_catalog(&self) -> Result<Catalog, ConsoleError> {
                Err(ConsoleError::Catalog("HTTP 502".into()))
            }
            async fn submit_scan(
                &self,
                _: &ScanConfiguration,
            ) -> Result<SessionHandle, ConsoleError> {
                unreachable!()
            }
            async fn fetch_progress(&self, _: &str) -> Result<ScanSession, ConsoleError> {
                unreachable!()
            }
            async fn fetch_report(
                &self,
                _: &str,
            ) -> Result<Option<crate::models::ReportDocument>, ConsoleError> {
                unreachable!()
            }
            async fn list_scans(
                &self,
            ) -> Result<Vec<crate::models::ScanListEntry>, ConsoleError> {
                unreachable!()
            }
            fn report_url(&self, _: &str, _: crate::backend::ReportFormat) -> String {
                unreachable!()
            }
        }

        let mut ctx = ConsoleContext::new(Arc::new(DownBackend));
        assert!(ctx.load_catalog().await.is_err());
        assert!(ctx.form().is_none());
        assert!(ctx.catalog().is_none());
        assert!(matches!(
            ctx.edit_field("timeout", "30s").unwrap_err(),
            ConsoleError::Catalog(_)
        ));
    }
}
