//! Playback session orchestration
//!
//! The session is the single owner of playback state. It runs as one tokio
//! task that serializes user commands, media-backend events and status poll
//! results, and fans the resulting transitions out to every attached
//! observer.

pub mod constants;
mod worker;

pub use worker::{PlayerSession, SessionHandle};

use std::time::Duration;

/// Tunable parameters of a playback session
///
/// The defaults implement the production cadence; tests shrink the
/// intervals to keep runs fast.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Poll interval while at least one observer is attached
    pub fast_interval: Duration,
    /// Poll interval while no observer is attached
    pub slow_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fast_interval: constants::fast_interval(),
            slow_interval: constants::slow_interval(),
        }
    }
}
