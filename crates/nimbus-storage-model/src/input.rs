//! Generated from the Nimbus Storage service model. DO NOT EDIT.

use crate::types::BlobPayload;

/// Storage ListBlobsInput.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBlobsInput {
    pub container: String,
    pub prefix: Option<String>,
    pub max_results: Option<i32>,
    pub continuation_token: Option<String>,
}

/// Storage GetBlobPropertiesInput.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetBlobPropertiesInput {
    pub container: String,
    pub key: String,
}

/// Storage PutBlobInput.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutBlobInput {
    pub container: String,
    pub key: String,
    pub content_type: Option<String>,
    pub body: BlobPayload,
}
