//! Background worker for a live stream playback session.
//!
//! The worker owns the playback state machine, the adaptive status poll
//! schedule and the observer registry. Every command, backend event and
//! poll result is handled on this single task, so state never sees
//! concurrent mutation.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use icystatus::StreamStatus;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::constants::{BACKEND_EVENT_CHANNEL_CAPACITY, COMMAND_CHANNEL_CAPACITY};
use super::SessionConfig;
use crate::backend::{BackendEvent, MediaBackend};
use crate::error::{Error, Result};
use crate::observer::{ObserverId, ObserverRegistry, SessionObserver};
use crate::state::PlaybackState;
use crate::status::StatusProvider;

/// Commands sent to the background worker.
pub(crate) enum SessionCommand {
    PrepareMedia {
        url: String,
    },
    TogglePlaying,
    Stop,
    Attach {
        id: ObserverId,
        observer: Arc<dyn SessionObserver>,
    },
    Detach {
        id: ObserverId,
    },
    Shutdown,
}

impl fmt::Debug for SessionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrepareMedia { url } => f.debug_struct("PrepareMedia").field("url", url).finish(),
            Self::TogglePlaying => write!(f, "TogglePlaying"),
            Self::Stop => write!(f, "Stop"),
            Self::Attach { id, .. } => f.debug_struct("Attach").field("id", id).finish(),
            Self::Detach { id } => f.debug_struct("Detach").field("id", id).finish(),
            Self::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Handle to the spawned session worker task.
///
/// Joining it with [`wait`](Self::wait) blocks until the session has been
/// shut down (or every [`SessionHandle`] has been dropped).
pub struct PlayerSession {
    join_handle: JoinHandle<()>,
}

impl PlayerSession {
    /// Spawn the session worker.
    ///
    /// The worker subscribes to the backend's event channel, schedules an
    /// immediate first status poll and then serializes everything through
    /// its own task until [`SessionHandle::shutdown`] is called or all
    /// handles are dropped.
    pub fn spawn(
        backend: Arc<dyn MediaBackend>,
        status: Arc<dyn StatusProvider>,
        config: SessionConfig,
    ) -> (Self, SessionHandle) {
        let (tx, mut rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (backend_tx, mut backend_rx) = mpsc::channel(BACKEND_EVENT_CHANNEL_CAPACITY);
        backend.subscribe(backend_tx);

        let join_handle = tokio::spawn(async move {
            info!("Starting playback session worker");

            let mut state = WorkerState::new(backend, status, config);
            let mut backend_closed = false;

            // First fetch happens immediately; every later one is delayed
            // by the cadence computed after the previous attempt.
            state.schedule_poll(Duration::ZERO);

            loop {
                if let Some(poll) = state.scheduled_poll.as_mut() {
                    let mut pending_command: Option<Option<SessionCommand>> = None;
                    let mut pending_event: Option<BackendEvent> = None;

                    tokio::select! {
                        cmd = rx.recv() => {
                            pending_command = Some(cmd);
                        }
                        event = backend_rx.recv(), if !backend_closed => {
                            match event {
                                Some(event) => pending_event = Some(event),
                                None => backend_closed = true,
                            }
                        }
                        _ = &mut poll.sleep => {
                            state.scheduled_poll = None;
                            state.run_poll().await;
                        }
                    }

                    if let Some(Some(cmd)) = pending_command {
                        state.handle_command(cmd);
                        if state.shutdown {
                            break;
                        }
                    } else if let Some(None) = pending_command {
                        // Command channel closed, terminate
                        break;
                    }

                    if let Some(event) = pending_event {
                        state.handle_backend_event(event);
                    }
                } else {
                    // No poll scheduled means shutdown cancelled it.
                    break;
                }
            }

            state.teardown();
            info!("Playback session worker stopped");
        });

        (Self { join_handle }, SessionHandle { commands: tx })
    }

    /// Wait for the worker task to finish.
    pub async fn wait(self) -> Result<()> {
        if let Err(err) = self.join_handle.await {
            if err.is_cancelled() {
                warn!("Session worker task cancelled: {err}");
                return Ok(());
            }
            return Err(Error::other(format!("Session worker join error: {err}")));
        }
        Ok(())
    }
}

/// Cloneable command interface to a running session.
///
/// Every method posts a command into the worker's serialized context;
/// [`Error::Closed`] means the session has been torn down.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Stop whatever is prepared and start buffering the given stream URL.
    pub async fn prepare_media(&self, url: impl Into<String>) -> Result<()> {
        self.send(SessionCommand::PrepareMedia { url: url.into() }).await
    }

    /// Pause if playing, otherwise start.
    ///
    /// Only meaningful once the session is Prepared (wait for the
    /// corresponding `on_state_changed` before calling); outside
    /// Prepared/Playing/Paused this is a no-op by contract.
    pub async fn toggle_playing(&self) -> Result<()> {
        self.send(SessionCommand::TogglePlaying).await
    }

    /// Stop playback. A no-op unless the backend is actively playing.
    pub async fn stop(&self) -> Result<()> {
        self.send(SessionCommand::Stop).await
    }

    /// Attach an observer and return its attachment id.
    ///
    /// If the session is already Prepared, Playing or Paused the current
    /// state is replayed to the new observer before any later event.
    pub async fn attach(&self, observer: Arc<dyn SessionObserver>) -> Result<ObserverId> {
        let id = ObserverId::new();
        self.send(SessionCommand::Attach { id, observer }).await?;
        Ok(id)
    }

    /// Detach a previously attached observer.
    pub async fn detach(&self, id: ObserverId) -> Result<()> {
        self.send(SessionCommand::Detach { id }).await
    }

    /// Tear the session down: cancel polling, release the backend and
    /// notify every observer of Stopped.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(SessionCommand::Shutdown).await
    }

    async fn send(&self, cmd: SessionCommand) -> Result<()> {
        self.commands.send(cmd).await.map_err(|_| Error::Closed)
    }
}

/// A pending status poll.
struct ScheduledPoll {
    sleep: Pin<Box<tokio::time::Sleep>>,
}

struct WorkerState {
    backend: Arc<dyn MediaBackend>,
    status: Arc<dyn StatusProvider>,
    config: SessionConfig,
    state: PlaybackState,
    current_url: Option<String>,
    observers: ObserverRegistry,
    scheduled_poll: Option<ScheduledPoll>,
    shutdown: bool,
}

impl WorkerState {
    fn new(
        backend: Arc<dyn MediaBackend>,
        status: Arc<dyn StatusProvider>,
        config: SessionConfig,
    ) -> Self {
        Self {
            backend,
            status,
            config,
            state: PlaybackState::Idle,
            current_url: None,
            observers: ObserverRegistry::new(),
            scheduled_poll: None,
            shutdown: false,
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    fn handle_command(&mut self, cmd: SessionCommand) {
        debug!(?cmd, "Session command");

        match cmd {
            SessionCommand::PrepareMedia { url } => self.restart_with(url),
            SessionCommand::TogglePlaying => self.toggle_playing(),
            SessionCommand::Stop => self.stop_playback(),
            SessionCommand::Attach { id, observer } => self.attach(id, observer),
            SessionCommand::Detach { id } => self.detach(id),
            SessionCommand::Shutdown => {
                self.shutdown = true;
                self.cancel_scheduled_poll();
            }
        }
    }

    fn toggle_playing(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause_playback(),
            PlaybackState::Prepared | PlaybackState::Paused => self.start_playback(),
            state => {
                // Documented precondition: callers wait for Prepared first.
                debug!(?state, "Ignoring toggle outside prepared/playing/paused");
            }
        }
    }

    fn start_playback(&mut self) {
        self.backend.start();
        self.set_state(PlaybackState::Playing);
    }

    fn pause_playback(&mut self) {
        if self.backend.is_playing() {
            self.backend.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    fn stop_playback(&mut self) {
        if self.backend.is_playing() {
            self.backend.stop();
            self.backend.reset();
            self.set_state(PlaybackState::Stopped);
        }
    }

    fn attach(&mut self, id: ObserverId, observer: Arc<dyn SessionObserver>) {
        debug!(observer = %id, count = self.observers.len() + 1, "Observer attached");
        self.observers.insert(id, Arc::clone(&observer));

        // A new surface must see the current state synchronously instead
        // of waiting for the next transition.
        if self.state.is_replayed_on_attach() {
            observer.on_state_changed(self.state);
        }

        self.reschedule_poll();
    }

    fn detach(&mut self, id: ObserverId) {
        if self.observers.remove(id) {
            debug!(observer = %id, count = self.observers.len(), "Observer detached");
        } else {
            debug!(observer = %id, "Detach for unknown observer id");
        }
        self.reschedule_poll();
    }

    // ------------------------------------------------------------------
    // Backend events
    // ------------------------------------------------------------------

    fn handle_backend_event(&mut self, event: BackendEvent) {
        debug!(?event, "Backend event");

        match event {
            BackendEvent::Prepared => {
                if self.state == PlaybackState::Preparing {
                    self.set_state(PlaybackState::Prepared);
                } else {
                    debug!(state = ?self.state, "Ignoring stale prepared event");
                }
            }
            BackendEvent::BufferingStart => {
                // Transient signal: the state value does not change while
                // already playing or paused.
                self.observers.notify_buffering();
            }
            BackendEvent::BufferingEnd => {
                if self.backend.is_playing() {
                    // Re-emit Playing as the resume signal even when the
                    // state value itself did not change.
                    self.state = PlaybackState::Playing;
                    self.observers.notify_state(PlaybackState::Playing);
                }
            }
            BackendEvent::Error(cause) => {
                warn!(cause = %cause, "Backend failure");
                self.backend.reset();
                self.set_state(PlaybackState::Failed);
                self.observers.notify_error(&Error::Backend(cause));
            }
        }
    }

    // ------------------------------------------------------------------
    // Status polling
    // ------------------------------------------------------------------

    async fn run_poll(&mut self) {
        // Fetch only while somebody cares: an attached observer, or
        // unattended playback whose URL may change server-side. Skipped
        // attempts still reschedule so re-attachment is detected.
        if !self.observers.is_empty() || self.backend.is_playing() {
            match self.status.poll().await {
                Ok(Some(stream)) => self.apply_status(stream),
                Ok(None) => debug!("Status poll: stream is offline"),
                Err(err) => {
                    let classified = Error::from_status(err);
                    warn!(error = %classified, "Status poll failed");
                    self.observers.notify_error(&classified);
                }
            }
        } else {
            debug!("Skipping status fetch (no observers, not playing)");
        }

        // Cadence is computed after the attempt completes, never before.
        self.schedule_poll(self.poll_cadence());
    }

    fn apply_status(&mut self, stream: StreamStatus) {
        self.observers.notify_status(&stream);

        match self.state {
            // First advertised URL: prepare it right away.
            PlaybackState::Idle => self.begin_prepare(stream.listen_url),
            // An explicit stop sticks until the next command.
            PlaybackState::Stopped => {}
            _ if self.current_url.as_deref() != Some(stream.listen_url.as_str()) => {
                info!(
                    old = self.current_url.as_deref().unwrap_or(""),
                    new = %stream.listen_url,
                    "Advertised stream URL changed, re-preparing"
                );
                self.restart_with(stream.listen_url);
            }
            // Same URL: metadata-only update, already fanned out above.
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Preparation
    // ------------------------------------------------------------------

    /// Stop whatever the backend holds and buffer the given URL instead.
    /// A poll-advertised URL change supersedes in-flight playback.
    fn restart_with(&mut self, url: String) {
        self.backend.stop();
        self.backend.reset();
        self.begin_prepare(url);
    }

    fn begin_prepare(&mut self, url: String) {
        info!(url = %url, "Preparing stream");
        self.current_url = Some(url.clone());
        self.set_state(PlaybackState::Preparing);
        self.observers.notify_buffering();
        self.backend.prepare(&url);
    }

    // ------------------------------------------------------------------
    // State & schedule plumbing
    // ------------------------------------------------------------------

    fn set_state(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "Playback state changed");
            self.state = next;
            self.observers.notify_state(next);
        }
    }

    fn poll_cadence(&self) -> Duration {
        cadence_for(self.observers.len(), &self.config)
    }

    fn schedule_poll(&mut self, delay: Duration) {
        self.scheduled_poll = Some(ScheduledPoll {
            sleep: Box::pin(sleep(delay)),
        });
    }

    /// Replace the pending poll so an attach/detach switches cadence
    /// immediately instead of waiting out the old sleep.
    fn reschedule_poll(&mut self) {
        if self.scheduled_poll.is_some() {
            self.schedule_poll(self.poll_cadence());
        }
    }

    fn cancel_scheduled_poll(&mut self) {
        self.scheduled_poll = None;
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    fn teardown(&mut self) {
        self.cancel_scheduled_poll();

        if self.backend.is_playing() {
            self.backend.stop();
        }
        self.backend.reset();

        // Observers hear Stopped synchronously before the set is cleared.
        self.observers.notify_state(PlaybackState::Stopped);
        self.observers.clear();
        self.state = PlaybackState::Stopped;
    }
}

/// Cadence rule: fast while anyone is attached, slow otherwise.
fn cadence_for(observer_count: usize, config: &SessionConfig) -> Duration {
    if observer_count > 0 {
        config.fast_interval
    } else {
        config.slow_interval
    }
}
