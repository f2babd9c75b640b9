use serde::{Deserialize, Serialize};

/// Severity of a finding. The backend writes capitalized names; anything
/// else maps to `Unknown` rather than failing the whole report parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// One reported issue inside a scan's report.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(default)]
    pub id: String,
    /// Grouping key; findings without one land under "Other".
    pub category: Option<String>,
    pub severity: Option<Severity>,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub description: Option<String>,
}

/// Summary block at the head of a report. Every field is optional; the
/// renderer substitutes a placeholder for anything missing.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub preset: Option<String>,
    pub openapi_version: Option<String>,
    pub endpoints_scanned: Option<u64>,
    pub duration_ms: Option<u64>,
}

/// The terminal artifact of a finished scan, from `GET /api/report/<id>/json`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportDocument {
    #[serde(default)]
    pub meta: ReportMeta,
    #[serde(default)]
    pub security: Vec<Finding>,
}
