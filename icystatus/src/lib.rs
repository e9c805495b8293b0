//! # icystatus - Icecast status endpoint client
//!
//! `icystatus` is a small async client for the JSON status document served
//! by Icecast-compatible streaming servers (`/status-json.xsl`). It answers
//! one question: what is the server broadcasting right now?
//!
//! ## Features
//!
//! - **One-call status fetch**: GET + decode in a single async call
//! - **Tolerant decoding**: handles single-object and array `source`
//!   fields, and numeric-or-string listener counts
//! - **Domain conversion**: wire payload resolves into a [`StreamStatus`]
//!   with the title/server_name fallback applied
//! - **Async/Await**: built on tokio and reqwest
//!
//! ## Quick Start
//!
//! ```no_run
//! use icystatus::StatusClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StatusClient::new("http://radio.example.com/status-json.xsl")?;
//!
//!     let status = client.fetch_status().await?;
//!     match status.resolve_source()? {
//!         Some(stream) => {
//!             println!("On air: {}", stream.title);
//!             println!("Stream URL: {}", stream.listen_url);
//!             match stream.listeners {
//!                 Some(n) => println!("{} listening", n),
//!                 None => println!("Listener count unknown"),
//!             }
//!         }
//!         None => println!("Stream is offline"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Decode contract
//!
//! The payload is the nested `icestats.source` object. `title` falls back
//! to `server_name` when absent; both missing is a decode error. A missing
//! `listeners` field means the count is unknown, which is distinct from
//! zero. A payload without any `source` at all means the stream is
//! offline and resolves to `None` rather than an error.
//!
//! ## Error Handling
//!
//! All operations return `Result<T, Error>`:
//!
//! ```no_run
//! use icystatus::{Error, StatusClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = StatusClient::new("http://radio.example.com/status-json.xsl").unwrap();
//!
//!     match client.fetch_status().await {
//!         Ok(status) => println!("On air: {}", status.icestats.source.is_some()),
//!         Err(Error::Http(e)) => eprintln!("Network error: {}", e),
//!         Err(e) => eprintln!("Other error: {}", e),
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

// Re-exports for convenience
pub use client::{StatusClient, StatusClientBuilder};
pub use error::{Error, Result};
pub use models::{IceStats, IceStatus, Source, StreamStatus};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
