//! The transport capability boundary.
//!
//! The runtime never speaks HTTP itself: it hands a typed request to a
//! [`Transport`] implementation and receives a [`RawResponse`] whose body
//! is a lazy [`ByteStream`]. Request signing, endpoint resolution, and
//! retries all live behind this trait.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use nimbus_core::{ByteStream, NimbusResult};

/// Boxed future returned by [`Transport::send`].
pub type ResponseFuture = Pin<Box<dyn Future<Output = NimbusResult<RawResponse>> + Send>>;

/// A dispatched-but-unparsed response: status, headers, and a lazy body.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, not yet drained.
    pub body: ByteStream,
}

impl RawResponse {
    /// Create a raw response.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: ByteStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// A fully received response, body drained, handed to payload parsers.
#[derive(Debug, Clone)]
pub struct ResponseParts {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Drained response body.
    pub body: Bytes,
}

/// Capability to dispatch one request and obtain a raw response.
///
/// Implementations must support being invoked again, independently, for
/// follow-up requests built from continuation tokens. The boxed-future
/// signature keeps the trait object-safe so clients can hold an
/// `Arc<dyn Transport<R>>`.
pub trait Transport<R>: Send + Sync + 'static {
    /// Dispatch a request. The returned future completes when the
    /// response head has arrived; the body is consumed lazily afterwards.
    fn send(&self, request: R) -> ResponseFuture;
}
