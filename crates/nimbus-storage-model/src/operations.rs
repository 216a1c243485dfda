//! Generated from the Nimbus Storage service model. DO NOT EDIT.

/// All supported Storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// The ListBlobs operation.
    ListBlobs,
    /// The GetBlobProperties operation.
    GetBlobProperties,
    /// The PutBlob operation.
    PutBlob,
}

impl StorageOperation {
    /// The operation name as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListBlobs => "ListBlobs",
            Self::GetBlobProperties => "GetBlobProperties",
            Self::PutBlob => "PutBlob",
        }
    }
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
