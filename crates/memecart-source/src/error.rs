use thiserror::Error;

/// Failures loading the catalog from its source.
///
/// Every variant is a transport-level failure: the caller may always issue
/// the fetch again. [`SourceError::is_transient`] marks the subset worth an
/// automatic retry with backoff.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("catalog source at {url} reported failure: {message}")]
    Unsuccessful { url: String, message: String },

    #[error("normalization error for item {id}: {reason}")]
    Normalization { id: String, reason: String },

    #[error("invalid catalog URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl SourceError {
    /// Returns `true` for failures that may clear up on their own: rate
    /// limiting, server errors, and network-level faults.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::RateLimited { .. } | SourceError::Http(_) => true,
            SourceError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
