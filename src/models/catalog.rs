use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Server-advertised enumerations and defaults, fetched once per console
/// start from `GET /api/config`. Enum-valued form fields may only ever take
/// values listed here.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub defaults: CatalogDefaults,
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub exploit_depth: Vec<String>,
    #[serde(default)]
    pub log_levels: Vec<String>,
    /// Candidate base URLs, in the order the backend advertises them.
    #[serde(default)]
    pub servers: Vec<String>,
    /// Per-field help text, keyed by the camelCase field name.
    #[serde(default)]
    pub help: HashMap<String, String>,
}

/// Partial configuration seed inside the catalog. Anything the server does
/// not advertise stays `None` and the form field starts empty.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDefaults {
    pub openapi: Option<String>,
    pub token_file: Option<String>,
    pub preset: Option<String>,
    pub timeout: Option<String>,
    pub discover_undocumented: Option<bool>,
    pub strict_contract: Option<bool>,
}
