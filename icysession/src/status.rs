//! Status polling seam
//!
//! The session worker depends on this trait rather than on the concrete
//! HTTP client, so tests can script poll outcomes without a network.

use async_trait::async_trait;
use icystatus::{StatusClient, StreamStatus};

/// One status poll against the remote endpoint
///
/// `Ok(None)` means the endpoint answered but no source is on air; errors
/// are classified by the session into transport or decode failures.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn poll(&self) -> icystatus::Result<Option<StreamStatus>>;
}

#[async_trait]
impl StatusProvider for StatusClient {
    async fn poll(&self) -> icystatus::Result<Option<StreamStatus>> {
        let status = self.fetch_status().await?;
        status.resolve_source()
    }
}
