//! Deferred, at-most-once response resolution.
//!
//! A [`DeferredResponse`] is handed back as soon as a call is dispatched.
//! Nothing is read or parsed until the first accessor runs; the first
//! access drains the response and parses it, and every later access
//! returns the same cached value or re-raises the same stored error
//! without touching the network again.

use std::fmt;
use std::sync::Arc;

use nimbus_core::{NimbusError, NimbusResult};
use tokio::sync::Mutex;
use tracing::debug;

use crate::transport::{ResponseFuture, ResponseParts};

type ParseFn<T> = Box<dyn FnOnce(ResponseParts) -> NimbusResult<T> + Send>;

/// Resolution state. Transitions `Pending -> Resolving -> {Resolved |
/// Failed}` exactly once; `Resolving` guards against re-entrant
/// resolution while the in-flight resolver owns the pending call.
enum CallState<T> {
    Pending {
        response: ResponseFuture,
        parse: ParseFn<T>,
    },
    Resolving,
    Resolved(Arc<T>),
    Failed(NimbusError),
}

impl<T> CallState<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::Pending { .. } => "pending",
            Self::Resolving => "resolving",
            Self::Resolved(_) => "resolved",
            Self::Failed(_) => "failed",
        }
    }
}

/// The outcome of one dispatched call, parsed on first access.
pub struct DeferredResponse<T> {
    request_id: String,
    state: Mutex<CallState<T>>,
}

impl<T> DeferredResponse<T> {
    /// Wrap a dispatched call and the parser for its payload.
    ///
    /// `parse` runs at most once, on the first accessor, and only for
    /// success statuses; non-success responses become protocol errors
    /// before the parser is consulted.
    #[must_use]
    pub fn new<F>(response: ResponseFuture, parse: F) -> Self
    where
        F: FnOnce(ResponseParts) -> NimbusResult<T> + Send + 'static,
    {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            state: Mutex::new(CallState::Pending {
                response,
                parse: Box::new(parse),
            }),
        }
    }

    /// Client-generated id for this call, carried through tracing output.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The parsed output, resolving the call on first access.
    ///
    /// # Errors
    /// Returns the stored transport, protocol, or parse error of a failed
    /// resolution — the same error on every call — or a usage error if
    /// invoked while a resolution is already in flight.
    pub async fn output(&self) -> NimbusResult<Arc<T>> {
        let mut guard = self.state.lock().await;
        match std::mem::replace(&mut *guard, CallState::Resolving) {
            CallState::Resolved(value) => {
                *guard = CallState::Resolved(Arc::clone(&value));
                Ok(value)
            }
            CallState::Failed(error) => {
                *guard = CallState::Failed(error.clone());
                Err(error)
            }
            // The in-flight resolver owns the state; accessing the result
            // from within the resolution path is a contract violation.
            CallState::Resolving => Err(NimbusError::usage(format!(
                "response {} is already resolving; results cannot be read from within resolution",
                self.request_id
            ))),
            CallState::Pending { response, parse } => {
                drop(guard);
                debug!(request_id = %self.request_id, "resolving response");
                let outcome = run_resolution(response, parse).await;
                let mut guard = self.state.lock().await;
                match outcome {
                    Ok(value) => {
                        debug!(request_id = %self.request_id, "response resolved");
                        let value = Arc::new(value);
                        *guard = CallState::Resolved(Arc::clone(&value));
                        Ok(value)
                    }
                    Err(error) => {
                        debug!(request_id = %self.request_id, error = %error, "response failed");
                        *guard = CallState::Failed(error.clone());
                        Err(error)
                    }
                }
            }
        }
    }

    /// Resolve (if needed) and project a field out of the output.
    ///
    /// Generated accessor methods are thin wrappers over this.
    ///
    /// # Errors
    /// Same contract as [`DeferredResponse::output`].
    pub async fn map_output<R>(&self, f: impl FnOnce(&T) -> R) -> NimbusResult<R> {
        Ok(f(self.output().await?.as_ref()))
    }
}

/// Drain and parse one response. Transport failures, non-success
/// statuses, and undecodable payloads all end up as the stored error.
async fn run_resolution<T>(response: ResponseFuture, parse: ParseFn<T>) -> NimbusResult<T> {
    let raw = response.await?;
    let status = raw.status;
    let headers = raw.headers;
    let mut body = raw.body;
    let body = body.collect_bytes().await?;
    if !status.is_success() {
        return Err(NimbusError::protocol(status, body));
    }
    parse(ResponseParts {
        status,
        headers,
        body,
    })
}

impl<T> fmt::Debug for DeferredResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state.try_lock() {
            Ok(guard) => guard.name(),
            Err(_) => "locked",
        };
        f.debug_struct("DeferredResponse")
            .field("request_id", &self.request_id)
            .field("state", &state)
            .finish()
    }
}
