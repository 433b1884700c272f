use thiserror::Error;

/// Main error type for the search engine.
///
/// An empty result list is not represented here: no match above the
/// threshold is a valid outcome, not a failure.
#[derive(Error, Debug)]
pub enum SearchEngineError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory errors
    #[error("Directory '{directory}' error: {message}")]
    Directory { directory: String, message: String },

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for SearchEngineError {
    fn from(s: String) -> Self {
        SearchEngineError::Other(s)
    }
}

impl From<&str> for SearchEngineError {
    fn from(s: &str) -> Self {
        SearchEngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SearchEngineError>;
