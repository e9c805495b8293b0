//! Media backend capability
//!
//! The transport that actually decodes and plays audio bytes is an external
//! collaborator, abstracted behind [`MediaBackend`]. The session drives it
//! with fire-and-forget operations; completions and failures come back
//! asynchronously as [`BackendEvent`]s over a channel the session wires in
//! at spawn time.

use tokio::sync::mpsc;

/// Asynchronous events a media backend reports back to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// A previously requested `prepare` finished buffering
    Prepared,
    /// The backend ran out of buffered data mid-playback
    BufferingStart,
    /// The backend refilled its buffer after a `BufferingStart`
    BufferingEnd,
    /// Preparation or playback failed fatally
    Error(String),
}

/// Capability set of an audio playback backend
///
/// All operations are fire-and-forget from the session's perspective:
/// `prepare` kicks off asynchronous buffering whose outcome arrives later
/// as a [`BackendEvent::Prepared`] or [`BackendEvent::Error`], and the
/// transport operations return immediately. The only state the session
/// ever reads back directly is the `is_playing` boolean.
///
/// Implementations take `&self` and are expected to manage their own
/// interior mutability; the session shares the backend behind an `Arc`.
pub trait MediaBackend: Send + Sync {
    /// Start buffering the given stream URL.
    ///
    /// Failures are reported through the event channel, not as a return
    /// value.
    fn prepare(&self, url: &str);

    /// Start (or resume) audible playback of a prepared stream.
    fn start(&self);

    /// Pause audible playback, keeping the stream prepared.
    fn pause(&self);

    /// Stop playback.
    fn stop(&self);

    /// Release any prepared stream and return to a blank slate.
    fn reset(&self);

    /// Whether audio is currently audible.
    fn is_playing(&self) -> bool;

    /// Wire in the sender the backend must deliver its events through.
    ///
    /// Called once by the session at spawn time, before any other
    /// operation.
    fn subscribe(&self, events: mpsc::Sender<BackendEvent>);
}
