//! Error types for the playback session

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a playback session
///
/// Transport and decode failures are absorbed by the poll loop and only
/// reported to observers via
/// [`SessionObserver::on_error`](crate::SessionObserver::on_error); they
/// never stop the loop or terminate playback. Backend failures additionally
/// transition the session to [`PlaybackState::Failed`](crate::PlaybackState).
/// Commands issued outside their valid state are silent no-ops and never
/// produce an error at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The status poll could not reach the endpoint
    #[error("Status fetch failed: {0}")]
    Transport(#[source] icystatus::Error),

    /// The status payload arrived but violated the decode contract
    #[error("Status payload invalid: {0}")]
    Decode(#[source] icystatus::Error),

    /// The media backend reported a preparation or playback failure
    #[error("Media backend failure: {0}")]
    Backend(String),

    /// The session worker is no longer running
    #[error("Session is no longer running")]
    Closed,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Classify a status client failure into the session taxonomy.
    pub fn from_status(err: icystatus::Error) -> Self {
        if err.is_transport() {
            Self::Transport(err)
        } else {
            Self::Decode(err)
        }
    }
}
