//! Playback state of a live stream session

use serde::{Deserialize, Serialize};

/// The playback state owned by a session
///
/// Exactly one value exists per session and only the session worker mutates
/// it; observers are told of every transition through
/// [`SessionObserver::on_state_changed`](crate::SessionObserver::on_state_changed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No stream URL known yet
    Idle,
    /// The backend is buffering a stream
    Preparing,
    /// The stream is buffered and ready to start
    Prepared,
    /// The stream is audible
    Playing,
    /// Playback is paused but the stream stays prepared
    Paused,
    /// Playback was explicitly stopped
    Stopped,
    /// The backend reported a fatal error; recovery needs a fresh prepare
    Failed,
}

impl PlaybackState {
    /// Whether transport commands (`start`/`pause`/`toggle`) are meaningful
    /// in this state. Outside this set they are silent no-ops.
    pub fn accepts_transport_commands(&self) -> bool {
        matches!(self, Self::Prepared | Self::Playing | Self::Paused)
    }

    /// Whether this state is replayed to a freshly attached observer.
    ///
    /// `Stopped` is deliberately not replayed: a new surface attaching to a
    /// stopped session should see nothing until something happens.
    pub fn is_replayed_on_attach(&self) -> bool {
        matches!(self, Self::Prepared | Self::Playing | Self::Paused)
    }
}
