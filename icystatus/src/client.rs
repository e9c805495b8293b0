//! HTTP client for Icecast-compatible status endpoints

use crate::error::{Error, Result};
use crate::models::IceStatus;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default timeout for status requests
///
/// The status payload is a few hundred bytes, so anything slower than this
/// is a stalled connection. Spelled out explicitly rather than relying on
/// the transport's implicit default.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "icystatus/0.1.0";

/// Client for fetching the live status of an Icecast-compatible server
///
/// The client is stateless per call: every [`fetch_status`](Self::fetch_status)
/// performs one GET against the configured endpoint and decodes the JSON
/// body. It is cheap to clone (the underlying `reqwest::Client` shares its
/// connection pool).
///
/// # Example
///
/// ```no_run
/// use icystatus::StatusClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = StatusClient::new("http://radio.example.com/status-json.xsl")?;
///     let status = client.fetch_status().await?;
///     if let Some(stream) = status.resolve_source()? {
///         println!("On air: {} ({})", stream.title, stream.listen_url);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl StatusClient {
    /// Create a new client for the given status endpoint with default settings
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        Self::builder().endpoint(endpoint.as_ref()).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> StatusClientBuilder {
        StatusClientBuilder::default()
    }

    /// The endpoint URL this client polls
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the current status document from the endpoint
    ///
    /// A non-success HTTP status is reported as [`Error::Endpoint`]; a body
    /// that is not valid JSON for the expected envelope is an [`Error::Http`]
    /// decode failure from the transport layer.
    pub async fn fetch_status(&self) -> Result<IceStatus> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching stream status");

        let response = self
            .client
            .get(self.endpoint.clone())
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Endpoint(response.status()));
        }

        let status: IceStatus = response.json().await?;

        tracing::debug!(
            endpoint = %self.endpoint,
            on_air = status.icestats.source.is_some(),
            "Received stream status"
        );

        Ok(status)
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

/// Builder for configuring a [`StatusClient`]
#[derive(Debug)]
pub struct StatusClientBuilder {
    client: Option<Client>,
    endpoint: Option<String>,
    request_timeout: Duration,
    user_agent: String,
}

impl Default for StatusClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            endpoint: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl StatusClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    ///
    /// Useful for sharing connection pools or custom proxy settings.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the status endpoint URL (required)
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<StatusClient> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::other("Status endpoint URL is required"))?;
        let endpoint = Url::parse(&endpoint)?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.request_timeout)
                .build()?,
        };

        Ok(StatusClient {
            client,
            endpoint,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = StatusClientBuilder::default();
        assert_eq!(
            builder.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(builder.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_build_requires_endpoint() {
        assert!(StatusClientBuilder::default().build().is_err());
    }

    #[test]
    fn test_build_rejects_invalid_endpoint() {
        let result = StatusClient::new("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
