//! The generated Storage operation surface.

use std::fmt;
use std::sync::Arc;

use nimbus_client::{DeferredResponse, PagedResponse, Transport};
use nimbus_core::{ByteStream, NimbusConfig, NimbusError, NimbusResult};
use nimbus_storage_model::input::{GetBlobPropertiesInput, ListBlobsInput, PutBlobInput};
use nimbus_storage_model::output::{GetBlobPropertiesOutput, PutBlobOutput};
use nimbus_storage_model::types::BlobPayload;
use tracing::debug;

use crate::codec::ListBlobsCodec;
use crate::request::StorageRequest;

/// Client for the Nimbus Storage service.
///
/// Every method returns immediately with an in-flight call handle;
/// nothing is read or parsed until the handle is first accessed.
#[derive(Clone)]
pub struct StorageClient {
    transport: Arc<dyn Transport<StorageRequest>>,
    config: NimbusConfig,
    list_codec: Arc<ListBlobsCodec>,
}

impl StorageClient {
    /// Create a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport<StorageRequest>>, config: NimbusConfig) -> Self {
        Self {
            transport,
            config,
            list_codec: Arc::new(ListBlobsCodec),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &NimbusConfig {
        &self.config
    }

    /// List blobs in a container.
    ///
    /// The returned page auto-paginates: its
    /// [`items`](PagedResponse::items) stream walks every page of the
    /// listing, prefetching the next page per the client configuration.
    #[must_use]
    pub fn list_blobs(&self, input: ListBlobsInput) -> PagedResponse<ListBlobsCodec> {
        debug!(container = %input.container, prefix = ?input.prefix, "dispatching ListBlobs");
        PagedResponse::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.list_codec),
            StorageRequest::ListBlobs(input),
            self.config.prefetch,
        )
    }

    /// Fetch metadata of one blob.
    #[must_use]
    pub fn get_blob_properties(
        &self,
        input: GetBlobPropertiesInput,
    ) -> DeferredResponse<GetBlobPropertiesOutput> {
        debug!(container = %input.container, key = %input.key, "dispatching GetBlobProperties");
        let request = StorageRequest::GetBlobProperties(input);
        DeferredResponse::new(self.transport.send(request), |parts| {
            serde_json::from_slice(&parts.body)
                .map_err(|err| NimbusError::parse(format!("GetBlobProperties output: {err}")))
        })
    }

    /// Upload one blob.
    #[must_use]
    pub fn put_blob(&self, input: PutBlobInput) -> DeferredResponse<PutBlobOutput> {
        debug!(
            container = %input.container,
            key = %input.key,
            size = input.body.len(),
            "dispatching PutBlob"
        );
        let request = StorageRequest::PutBlob(input);
        DeferredResponse::new(self.transport.send(request), |parts| {
            serde_json::from_slice(&parts.body)
                .map_err(|err| NimbusError::parse(format!("PutBlob output: {err}")))
        })
    }

    /// Upload one blob from a lazy byte source.
    ///
    /// Drains the stream into the upload payload, then dispatches; the
    /// source may be file-backed or generator-fed and is consumed
    /// destructively.
    ///
    /// # Errors
    /// Propagates producer failures from draining the stream.
    pub async fn put_blob_from_stream(
        &self,
        container: impl Into<String>,
        key: impl Into<String>,
        mut body: ByteStream,
    ) -> NimbusResult<DeferredResponse<PutBlobOutput>> {
        let data = body.collect_bytes().await?;
        Ok(self.put_blob(PutBlobInput {
            container: container.into(),
            key: key.into(),
            content_type: None,
            body: BlobPayload::from(data),
        }))
    }
}

impl fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageClient")
            .field("config", &self.config)
            .finish()
    }
}
