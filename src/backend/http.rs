use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::ConsoleError;
use crate::models::{Catalog, ReportDocument, ScanConfiguration, ScanListEntry, ScanSession, SessionHandle};

use super::{Backend, ReportFormat};

/// `reqwest`-based implementation of the backend contract against the
/// API Defender HTTP surface.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_catalog(&self) -> Result<Catalog, ConsoleError> {
        let resp = self
            .client
            .get(self.url("/api/config"))
            .send()
            .await
            .map_err(|e| ConsoleError::Catalog(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ConsoleError::Catalog(format!("HTTP {}", resp.status())));
        }

        let catalog: Catalog = resp
            .json()
            .await
            .map_err(|e| ConsoleError::Catalog(format!("invalid response: {}", e)))?;

        debug!(
            presets = catalog.presets.len(),
            servers = catalog.servers.len(),
            "Fetched configuration catalog"
        );
        Ok(catalog)
    }

    async fn submit_scan(&self, config: &ScanConfiguration) -> Result<SessionHandle, ConsoleError> {
        let resp = self
            .client
            .post(self.url("/api/scan"))
            .json(config)
            .send()
            .await
            .map_err(|e| ConsoleError::Network(format!("scan submission failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ConsoleError::Submission(format!("HTTP {}: {}", status, body)));
        }

        let handle: SessionHandle = resp
            .json()
            .await
            .map_err(|e| ConsoleError::Submission(format!("invalid response: {}", e)))?;

        debug!(session_id = %handle.id, "Scan submitted");
        Ok(handle)
    }

    async fn fetch_progress(&self, session_id: &str) -> Result<ScanSession, ConsoleError> {
        // reqwest percent-encodes the id through the typed query API.
        let resp = self
            .client
            .get(self.url("/api/progress"))
            .query(&[("id", session_id)])
            .send()
            .await
            .map_err(|e| ConsoleError::Network(format!("progress fetch failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ConsoleError::Network(format!(
                "progress fetch returned HTTP {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| ConsoleError::Network(format!("invalid progress response: {}", e)))
    }

    async fn fetch_report(&self, session_id: &str) -> Result<Option<ReportDocument>, ConsoleError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/report/{}/json", session_id)))
            .send()
            .await
            .map_err(|e| ConsoleError::Network(format!("report fetch failed: {}", e)))?;

        // The artifact may simply not exist yet. A non-2xx status or a body
        // that is not the expected document shape both mean "not ready".
        if !resp.status().is_success() {
            debug!(session_id, status = %resp.status(), "Report not ready");
            return Ok(None);
        }

        match resp.json::<ReportDocument>().await {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                debug!(session_id, error = %e, "Report body not parsable yet");
                Ok(None)
            }
        }
    }

    async fn list_scans(&self) -> Result<Vec<ScanListEntry>, ConsoleError> {
        let resp = self
            .client
            .get(self.url("/api/scans"))
            .send()
            .await
            .map_err(|e| ConsoleError::Network(format!("scan list failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ConsoleError::Network(format!(
                "scan list returned HTTP {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| ConsoleError::Network(format!("invalid scan list: {}", e)))
    }

    fn report_url(&self, session_id: &str, format: ReportFormat) -> String {
        self.url(&format!("/api/report/{}/{}", session_id, format.as_str()))
    }
}
