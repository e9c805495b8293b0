//! Data models for Icecast status endpoint responses
//!
//! This module contains the structures needed to deserialize the
//! `/status-json.xsl` style payload served by Icecast-compatible servers,
//! plus the conversion into the [`StreamStatus`] domain record consumed by
//! session code.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that some servers emit as a single object and others
/// as an array of objects (one per mount point). An array resolves to its
/// first element.
fn deserialize_one_or_many<'de, D>(deserializer: D) -> std::result::Result<Option<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Source),
        Many(Vec<Source>),
    }

    let opt = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match opt {
        None => None,
        Some(OneOrMany::One(source)) => Some(source),
        Some(OneOrMany::Many(sources)) => sources.into_iter().next(),
    })
}

/// Deserialize an optional listener count that may arrive as a string or a
/// number. An empty string resolves to `None`.
fn deserialize_optional_string_or_u64<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrU64 {
        String(String),
        Number(u64),
    }

    let opt = Option::<StringOrU64>::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(StringOrU64::String(s)) => {
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<u64>().map(Some).map_err(D::Error::custom)
            }
        }
        Some(StringOrU64::Number(n)) => Ok(Some(n)),
    }
}

/// Top-level status document returned by the endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IceStatus {
    /// The `icestats` envelope every Icecast-compatible server wraps its
    /// report in
    pub icestats: IceStats,
}

/// The `icestats` envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IceStats {
    /// The active source (mount point), absent while nothing is streaming
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub source: Option<Source>,
}

/// A single source entry as reported by the server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Source {
    /// Stream title, if the source supplies one
    pub title: Option<String>,
    /// Server name, used as the title fallback
    pub server_name: Option<String>,
    /// Current listener count; absent means unknown, not zero
    #[serde(default, deserialize_with = "deserialize_optional_string_or_u64")]
    pub listeners: Option<u64>,
    /// URL of the stream itself
    pub listenurl: Option<String>,
}

impl IceStatus {
    /// Resolve the payload into a domain [`StreamStatus`].
    ///
    /// Returns `Ok(None)` when the server reports no active source (the
    /// stream is offline); that is a normal condition, not an error.
    /// Returns an error only when a source is present but violates the
    /// decode contract (no usable title, or no stream URL).
    pub fn resolve_source(&self) -> Result<Option<StreamStatus>> {
        match &self.icestats.source {
            None => Ok(None),
            Some(source) => source.resolve().map(Some),
        }
    }
}

impl Source {
    /// Convert this wire entry into a [`StreamStatus`].
    ///
    /// `title` falls back to `server_name`; both absent is a decode error,
    /// as is a missing `listenurl`.
    pub fn resolve(&self) -> Result<StreamStatus> {
        let title = self
            .title
            .clone()
            .or_else(|| self.server_name.clone())
            .ok_or(Error::MissingField("title"))?;

        let listen_url = self
            .listenurl
            .clone()
            .ok_or(Error::MissingField("listenurl"))?;

        Ok(StreamStatus {
            title,
            listen_url,
            listeners: self.listeners,
        })
    }
}

/// Decoded result of one status poll, immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStatus {
    /// Human-readable stream title
    pub title: String,
    /// URL of the live stream advertised by the server
    pub listen_url: String,
    /// Listener count; `None` means the server did not report one
    pub listeners: Option<u64>,
}
