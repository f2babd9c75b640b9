use serde::{Deserialize, Serialize};

use crate::errors::ConsoleError;
use crate::models::catalog::Catalog;

/// The user-editable scan request payload, serialized as the JSON body of
/// `POST /api/scan`. Seeded from catalog defaults on console start and
/// mutated one field at a time; it stays editable after a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfiguration {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub openapi: String,
    #[serde(default)]
    pub token_file: String,
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub timeout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,
    #[serde(default)]
    pub public_paths: Vec<String>,
    #[serde(default)]
    pub allow_cors_wildcard_public: bool,
    #[serde(default)]
    pub exploit_depth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_exploit_ops: Option<u32>,
    #[serde(default)]
    pub safety_skip_delete: bool,
    #[serde(default)]
    pub discover_undocumented: bool,
    #[serde(default)]
    pub strict_contract: bool,
    #[serde(default)]
    pub log_level: String,
}

/// Identity of one editable form field, by its camelCase wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    BaseUrl,
    Openapi,
    TokenFile,
    Preset,
    Timeout,
    Concurrency,
    PublicPaths,
    AllowCorsWildcardPublic,
    ExploitDepth,
    MaxExploitOps,
    SafetySkipDelete,
    DiscoverUndocumented,
    StrictContract,
    LogLevel,
}

impl ConfigField {
    pub const ALL: &'static [ConfigField] = &[
        ConfigField::BaseUrl,
        ConfigField::Openapi,
        ConfigField::TokenFile,
        ConfigField::Preset,
        ConfigField::Timeout,
        ConfigField::Concurrency,
        ConfigField::PublicPaths,
        ConfigField::AllowCorsWildcardPublic,
        ConfigField::ExploitDepth,
        ConfigField::MaxExploitOps,
        ConfigField::SafetySkipDelete,
        ConfigField::DiscoverUndocumented,
        ConfigField::StrictContract,
        ConfigField::LogLevel,
    ];

    /// The camelCase wire name, matching the catalog help keys.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigField::BaseUrl => "baseUrl",
            ConfigField::Openapi => "openapi",
            ConfigField::TokenFile => "tokenFile",
            ConfigField::Preset => "preset",
            ConfigField::Timeout => "timeout",
            ConfigField::Concurrency => "concurrency",
            ConfigField::PublicPaths => "publicPaths",
            ConfigField::AllowCorsWildcardPublic => "allowCorsWildcardPublic",
            ConfigField::ExploitDepth => "exploitDepth",
            ConfigField::MaxExploitOps => "maxExploitOps",
            ConfigField::SafetySkipDelete => "safetySkipDelete",
            ConfigField::DiscoverUndocumented => "discoverUndocumented",
            ConfigField::StrictContract => "strictContract",
            ConfigField::LogLevel => "logLevel",
        }
    }

    pub fn parse(name: &str) -> Result<ConfigField, ConsoleError> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| ConsoleError::UnknownField(name.to_string()))
    }
}

impl ScanConfiguration {
    /// Build the initial form from catalog defaults plus the console-level
    /// initial choices (log level, exploitation limits, safety toggles).
    pub fn initialize(catalog: &Catalog) -> Self {
        let d = &catalog.defaults;
        Self {
            base_url: String::new(),
            openapi: d.openapi.clone().unwrap_or_default(),
            token_file: d.token_file.clone().unwrap_or_default(),
            preset: d.preset.clone().unwrap_or_default(),
            timeout: d.timeout.clone().unwrap_or_default(),
            concurrency: None,
            public_paths: Vec::new(),
            allow_cors_wildcard_public: true,
            exploit_depth: "med".to_string(),
            max_exploit_ops: Some(40),
            safety_skip_delete: true,
            discover_undocumented: true,
            strict_contract: true,
            log_level: "info".to_string(),
        }
    }

    /// Return a copy with exactly one field replaced by the parsed value of
    /// `raw`. Enum-valued fields are checked against the catalog; everything
    /// else parses with per-field rules. All other fields are untouched.
    pub fn set_field(
        &self,
        field: ConfigField,
        raw: &str,
        catalog: &Catalog,
    ) -> Result<ScanConfiguration, ConsoleError> {
        let mut next = self.clone();
        match field {
            // Free text: the catalog's server list is suggestions, not a
            // constraint.
            ConfigField::BaseUrl => next.base_url = raw.to_string(),
            ConfigField::Openapi => next.openapi = raw.to_string(),
            ConfigField::TokenFile => next.token_file = raw.to_string(),
            ConfigField::Preset => {
                ensure_one_of(field, raw, &catalog.presets)?;
                next.preset = raw.to_string();
            }
            ConfigField::Timeout => next.timeout = raw.to_string(),
            ConfigField::Concurrency => next.concurrency = parse_positive(field, raw)?,
            ConfigField::PublicPaths => next.public_paths = split_csv(raw),
            ConfigField::AllowCorsWildcardPublic => {
                next.allow_cors_wildcard_public = parse_bool(field, raw)?
            }
            ConfigField::ExploitDepth => {
                ensure_one_of(field, raw, &catalog.exploit_depth)?;
                next.exploit_depth = raw.to_string();
            }
            ConfigField::MaxExploitOps => next.max_exploit_ops = parse_positive(field, raw)?,
            ConfigField::SafetySkipDelete => next.safety_skip_delete = parse_bool(field, raw)?,
            ConfigField::DiscoverUndocumented => {
                next.discover_undocumented = parse_bool(field, raw)?
            }
            ConfigField::StrictContract => next.strict_contract = parse_bool(field, raw)?,
            ConfigField::LogLevel => {
                ensure_one_of(field, raw, &catalog.log_levels)?;
                next.log_level = raw.to_string();
            }
        }
        Ok(next)
    }

    /// Local pre-submission check. The only hard requirement is a base URL;
    /// everything else is either optional or already catalog-checked.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.base_url.is_empty() {
            return Err(ConsoleError::MissingBaseUrl);
        }
        Ok(())
    }
}

/// Split a comma-separated field into its ordered elements, trimming each.
/// An empty or all-whitespace input is the empty set, never `[""]`.
pub fn split_csv(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Inverse of `split_csv` for display and re-editing.
pub fn join_csv(items: &[String]) -> String {
    items.join(",")
}

fn ensure_one_of(field: ConfigField, raw: &str, allowed: &[String]) -> Result<(), ConsoleError> {
    // An empty allowed list means the catalog did not constrain this field.
    if allowed.is_empty() || allowed.iter().any(|v| v == raw) {
        return Ok(());
    }
    Err(ConsoleError::InvalidFieldValue {
        field: field.name().to_string(),
        reason: format!("must be one of: {}", allowed.join(", ")),
    })
}

fn parse_bool(field: ConfigField, raw: &str) -> Result<bool, ConsoleError> {
    match raw.trim() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(ConsoleError::InvalidFieldValue {
            field: field.name().to_string(),
            reason: format!("expected true or false, got {:?}", other),
        }),
    }
}

fn parse_positive(field: ConfigField, raw: &str) -> Result<Option<u32>, ConsoleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConsoleError::InvalidFieldValue {
            field: field.name().to_string(),
            reason: format!("expected a positive integer, got {:?}", trimmed),
        }),
    }
}
