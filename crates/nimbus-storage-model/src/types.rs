//! Generated from the Nimbus Storage service model. DO NOT EDIT.

use chrono::{DateTime, Utc};

/// Storage class of a blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StorageClass {
    /// Frequently accessed data.
    #[default]
    Standard,
    /// Infrequently accessed data.
    Cool,
    /// Long-term archival data.
    Archive,
}

/// Summary of one blob as returned by listing operations.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobSummary {
    pub key: String,
    pub size: u64,
    pub etag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub storage_class: StorageClass,
}

/// Full metadata of one blob.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobProperties {
    pub key: String,
    pub size: u64,
    pub etag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub storage_class: StorageClass,
}

/// A wrapper around `bytes::Bytes` for blob payload data.
///
/// Upload payloads cross the transport boundary buffered; streaming
/// sources are drained into this wrapper by the client layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlobPayload {
    /// The underlying bytes data.
    pub data: bytes::Bytes,
}

impl BlobPayload {
    /// Create a new `BlobPayload` from bytes.
    #[must_use]
    pub fn new(data: impl Into<bytes::Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the length of the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl From<bytes::Bytes> for BlobPayload {
    fn from(data: bytes::Bytes) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for BlobPayload {
    fn from(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }
}

impl From<&[u8]> for BlobPayload {
    fn from(data: &[u8]) -> Self {
        Self {
            data: bytes::Bytes::copy_from_slice(data),
        }
    }
}
