//! Run a playback session against a real Icecast status endpoint.
//!
//! The media backend here is a stub that only logs its calls, so this
//! example exercises the polling, auto-prepare and observer plumbing
//! without producing audio.
//!
//! ```sh
//! cargo run --example live_session -- http://relay.example.com:8000/status-json.xsl
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use icysession::{
    BackendEvent, Error, MediaBackend, PlaybackState, PlayerSession, SessionConfig,
    SessionObserver,
};
use icystatus::{StatusClient, StreamStatus};
use tokio::sync::mpsc;
use tracing::info;

/// Backend stub: acknowledges every prepare right away.
#[derive(Default)]
struct LoggingBackend {
    inner: Mutex<LoggingBackendInner>,
}

#[derive(Default)]
struct LoggingBackendInner {
    events: Option<mpsc::Sender<BackendEvent>>,
    playing: bool,
}

impl MediaBackend for LoggingBackend {
    fn prepare(&self, url: &str) {
        info!(url = %url, "backend: prepare");
        let sender = self.inner.lock().unwrap().events.clone();
        if let Some(sender) = sender {
            let _ = sender.try_send(BackendEvent::Prepared);
        }
    }

    fn start(&self) {
        info!("backend: start");
        self.inner.lock().unwrap().playing = true;
    }

    fn pause(&self) {
        info!("backend: pause");
        self.inner.lock().unwrap().playing = false;
    }

    fn stop(&self) {
        info!("backend: stop");
        self.inner.lock().unwrap().playing = false;
    }

    fn reset(&self) {
        info!("backend: reset");
        self.inner.lock().unwrap().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.inner.lock().unwrap().playing
    }

    fn subscribe(&self, events: mpsc::Sender<BackendEvent>) {
        self.inner.lock().unwrap().events = Some(events);
    }
}

struct LoggingObserver;

impl SessionObserver for LoggingObserver {
    fn on_state_changed(&self, state: PlaybackState) {
        info!(?state, "observer: state changed");
    }

    fn on_buffering(&self) {
        info!("observer: buffering");
    }

    fn on_error(&self, error: &Error) {
        info!(%error, "observer: error");
    }

    fn on_status(&self, status: &StreamStatus) {
        info!(
            title = %status.title,
            listeners = ?status.listeners,
            url = %status.listen_url,
            "observer: stream status"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,icysession=debug".into()),
        )
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000/status-json.xsl".to_string());
    info!(endpoint = %endpoint, "Polling status endpoint");

    let status = Arc::new(StatusClient::new(&endpoint)?);
    let backend = Arc::new(LoggingBackend::default());

    let (session, handle) = PlayerSession::spawn(backend, status, SessionConfig::default());
    let id = handle.attach(Arc::new(LoggingObserver)).await?;

    // Let the session poll and auto-prepare for a while, then start
    // playback once prepared and finally tear everything down.
    tokio::time::sleep(Duration::from_secs(5)).await;
    handle.toggle_playing().await?;
    tokio::time::sleep(Duration::from_secs(20)).await;

    handle.detach(id).await?;
    handle.shutdown().await?;
    session.wait().await?;

    Ok(())
}
