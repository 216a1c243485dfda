//! Typed requests dispatched to the Storage transport.

use nimbus_storage_model::StorageOperation;
use nimbus_storage_model::input::{GetBlobPropertiesInput, ListBlobsInput, PutBlobInput};

/// One Storage operation's request, as handed to the transport.
///
/// The transport owns marshaling this into an HTTP exchange (path,
/// query string, signing); the client layer never sees wire bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageRequest {
    /// List blobs in a container.
    ListBlobs(ListBlobsInput),
    /// Fetch metadata of one blob.
    GetBlobProperties(GetBlobPropertiesInput),
    /// Upload one blob.
    PutBlob(PutBlobInput),
}

impl StorageRequest {
    /// The operation this request belongs to.
    #[must_use]
    pub fn operation(&self) -> StorageOperation {
        match self {
            Self::ListBlobs(_) => StorageOperation::ListBlobs,
            Self::GetBlobProperties(_) => StorageOperation::GetBlobProperties,
            Self::PutBlob(_) => StorageOperation::PutBlob,
        }
    }

    /// The container the request addresses.
    #[must_use]
    pub fn container(&self) -> &str {
        match self {
            Self::ListBlobs(input) => &input.container,
            Self::GetBlobProperties(input) => &input.container,
            Self::PutBlob(input) => &input.container,
        }
    }
}
