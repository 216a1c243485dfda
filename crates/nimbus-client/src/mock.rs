//! Scripted transport for tests and local development.
//!
//! [`MockTransport`] plays back a queue of canned responses and records
//! every dispatched request, so tests can assert how many times the wire
//! was actually read and what was sent. An optional per-call latency
//! queue simulates slow exchanges for overlap and cancellation tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use nimbus_core::{ByteStream, NimbusError, NimbusResult};
use parking_lot::Mutex;

use crate::transport::{RawResponse, ResponseFuture, Transport};

/// A canned response for [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl MockResponse {
    /// A `200 OK` response with the given body.
    #[must_use]
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::status(StatusCode::OK, body)
    }

    /// A response with an explicit status and body.
    #[must_use]
    pub fn status(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Attach a header to the response.
    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    fn into_raw(self) -> RawResponse {
        RawResponse::new(self.status, self.headers, ByteStream::from(self.body))
    }
}

struct MockInner<R> {
    responses: Mutex<VecDeque<NimbusResult<MockResponse>>>,
    latencies: Mutex<VecDeque<Duration>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<R>>,
}

/// Transport implementation that plays back scripted responses in order.
///
/// Cheap to clone; all clones share one script and one call counter.
pub struct MockTransport<R> {
    inner: Arc<MockInner<R>>,
}

impl<R> MockTransport<R> {
    /// Create a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockInner {
                responses: Mutex::new(VecDeque::new()),
                latencies: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Append a response to the script.
    pub fn enqueue(&self, response: MockResponse) {
        self.inner.responses.lock().push_back(Ok(response));
    }

    /// Append a failure to the script.
    pub fn enqueue_error(&self, error: NimbusError) {
        self.inner.responses.lock().push_back(Err(error));
    }

    /// Append a per-call latency; the Nth latency delays the Nth send.
    pub fn push_latency(&self, latency: Duration) {
        self.inner.latencies.lock().push_back(latency);
    }

    /// Number of exchanges that actually completed on the wire.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Number of scripted responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inner.responses.lock().len()
    }
}

impl<R: Clone> MockTransport<R> {
    /// The requests dispatched so far, in completion order.
    #[must_use]
    pub fn requests(&self) -> Vec<R> {
        self.inner.requests.lock().clone()
    }
}

impl<R> Default for MockTransport<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for MockTransport<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for MockTransport<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("calls", &self.call_count())
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl<R: Send + 'static> Transport<R> for MockTransport<R> {
    fn send(&self, request: R) -> ResponseFuture {
        let inner = Arc::clone(&self.inner);
        let latency = inner.latencies.lock().pop_front();
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            inner.calls.fetch_add(1, Ordering::SeqCst);
            inner.requests.lock().push(request);
            match inner.responses.lock().pop_front() {
                Some(Ok(response)) => Ok(response.into_raw()),
                Some(Err(error)) => Err(error),
                None => Err(NimbusError::usage("mock transport script is exhausted")),
            }
        })
    }
}
