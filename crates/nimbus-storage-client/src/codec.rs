//! Pagination codec for the ListBlobs operation.

use nimbus_client::{Page, PageCodec, ResponseParts};
use nimbus_core::{NimbusError, NimbusResult};
use nimbus_storage_model::output::ListBlobsOutput;
use nimbus_storage_model::types::BlobSummary;
use tracing::warn;

use crate::request::StorageRequest;

/// How ListBlobs pages: stamp the continuation token into a fresh
/// request, and decode one JSON page into blob summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListBlobsCodec;

impl PageCodec for ListBlobsCodec {
    type Item = BlobSummary;
    type Request = StorageRequest;

    fn next_request(&self, origin: &StorageRequest, token: &str) -> StorageRequest {
        match origin {
            StorageRequest::ListBlobs(input) => {
                let mut next = input.clone();
                next.continuation_token = Some(token.to_owned());
                StorageRequest::ListBlobs(next)
            }
            other => {
                warn!(operation = %other.operation(), "continuation token on a non-listing request");
                other.clone()
            }
        }
    }

    fn parse_page(&self, parts: ResponseParts) -> NimbusResult<Page<BlobSummary>> {
        let output: ListBlobsOutput = serde_json::from_slice(&parts.body)
            .map_err(|err| NimbusError::parse(format!("ListBlobs page: {err}")))?;
        Ok(Page::new(output.blobs, output.next_continuation_token))
    }
}
