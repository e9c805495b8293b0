//! Observer capability and registry
//!
//! UI surfaces attach to a running session to be told about state changes,
//! buffering, errors and fresh status records. Attachment and detachment
//! happen concurrently with playback; the registry is only ever touched
//! from the session worker, and fan-out iterates a snapshot so an observer
//! detaching in reaction to an event cannot corrupt the iteration.

use std::fmt;
use std::sync::Arc;

use icystatus::StreamStatus;
use uuid::Uuid;

use crate::error::Error;
use crate::state::PlaybackState;

/// Capability set an attached observer must support
///
/// Callbacks are invoked from the session worker task; implementations
/// should hand off anything slow rather than block the session.
pub trait SessionObserver: Send + Sync {
    /// The session's playback state changed to `state`.
    ///
    /// Also invoked once right after attaching when the session is already
    /// Prepared, Playing or Paused, so a new surface sees the current
    /// state without waiting for the next transition.
    fn on_state_changed(&self, state: PlaybackState);

    /// The backend is buffering. Transient: when it fires mid-playback the
    /// state value itself does not change.
    fn on_buffering(&self) {}

    /// A transport, decode or backend failure occurred.
    fn on_error(&self, _error: &Error) {}

    /// A status poll produced a fresh stream status record.
    fn on_status(&self, _status: &StreamStatus) {}
}

/// Identity of one observer attachment
///
/// Each attach yields a fresh id; the same underlying observer may
/// re-attach after detaching and will be tracked under the new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The set of currently attached observers
///
/// Owned exclusively by the session worker; all mutation is serialized
/// through it.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    entries: Vec<(ObserverId, Arc<dyn SessionObserver>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ObserverId, observer: Arc<dyn SessionObserver>) {
        self.entries.push((id, observer));
    }

    /// Remove an attachment. Returns whether the id was present.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn snapshot(&self) -> Vec<Arc<dyn SessionObserver>> {
        self.entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }

    pub fn notify_state(&self, state: PlaybackState) {
        for observer in self.snapshot() {
            observer.on_state_changed(state);
        }
    }

    pub fn notify_buffering(&self) {
        for observer in self.snapshot() {
            observer.on_buffering();
        }
    }

    pub fn notify_error(&self, error: &Error) {
        for observer in self.snapshot() {
            observer.on_error(error);
        }
    }

    pub fn notify_status(&self, status: &StreamStatus) {
        for observer in self.snapshot() {
            observer.on_status(status);
        }
    }
}
