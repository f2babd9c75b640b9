use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Catalog fetch failed: {0}")]
    Catalog(String),

    #[error("Base URL is required")]
    MissingBaseUrl,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("Scan submission failed: {0}")]
    Submission(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
