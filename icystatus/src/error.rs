//! Error types for the status endpoint client

/// Result type alias for status endpoint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when fetching or decoding a stream status
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Endpoint answered with a non-success status code
    #[error("Status endpoint returned {0}")]
    Endpoint(reqwest::StatusCode),

    /// A field the decode contract requires was absent from the payload
    #[error("Status payload is missing required field `{0}`")]
    MissingField(&'static str),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether this error came from the transport layer rather than the
    /// payload contents.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Endpoint(_))
    }
}
