//! Background playback session for a single live audio stream.
//!
//! This crate keeps a live stream playing independently of any user
//! interface. A [`PlayerSession`] owns a media backend, polls the
//! station's status endpoint and exposes a small command surface through
//! a cloneable [`SessionHandle`]; user interfaces attach and detach as
//! [`SessionObserver`]s without ever interrupting playback.
//!
//! # Architecture
//!
//! Everything runs on one background task. Commands, media backend
//! events and status poll results are all funneled through that task, so
//! the playback state machine is mutated from exactly one place and
//! observers always see transitions in order.
//!
//! The status endpoint is polled adaptively: every few seconds while an
//! observer is attached, and on a relaxed cadence when playback continues
//! unattended. The first advertised stream URL is prepared automatically,
//! and a later change of the advertised URL supersedes whatever is
//! currently playing.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use icysession::{PlayerSession, SessionConfig};
//! # use icysession::{MediaBackend, StatusProvider};
//! # async fn run(backend: Arc<dyn MediaBackend>, status: Arc<dyn StatusProvider>) -> icysession::Result<()> {
//! let (session, handle) = PlayerSession::spawn(backend, status, SessionConfig::default());
//!
//! // ... attach observers, toggle playback ...
//!
//! handle.shutdown().await?;
//! session.wait().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod observer;
pub mod session;
pub mod state;
pub mod status;

pub use backend::{BackendEvent, MediaBackend};
pub use error::{Error, Result};
pub use observer::{ObserverId, SessionObserver};
pub use session::{PlayerSession, SessionConfig, SessionHandle};
pub use state::PlaybackState;
pub use status::StatusProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
