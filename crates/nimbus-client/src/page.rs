//! Page shape and the per-operation pagination capabilities.
//!
//! The runtime is generic over exactly two things a generated listing
//! operation knows: how to stamp a continuation token into a fresh
//! request, and how to parse one response into a page of items. Both live
//! on [`PageCodec`]; everything else about wire formats stays out of the
//! runtime.

use crate::transport::ResponseParts;
use nimbus_core::NimbusResult;

/// One page of a multi-page listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items of this page, in service order.
    pub items: Vec<T>,
    /// Opaque token for the next page; `None` on the final page.
    pub continuation_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a page.
    #[must_use]
    pub fn new(items: Vec<T>, continuation_token: Option<String>) -> Self {
        Self {
            items,
            continuation_token,
        }
    }

    /// Whether more pages follow this one.
    ///
    /// Emptiness of a page is not a termination signal; only the absence
    /// of a continuation token is.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.continuation_token.is_some()
    }
}

/// Pagination capabilities of one generated listing operation.
pub trait PageCodec: Send + Sync + 'static {
    /// Item type the listing yields.
    type Item: Clone + Send + Sync + 'static;
    /// Request type of the operation. Cloned as the immutable template
    /// each follow-up request is built from.
    type Request: Clone + Send + Sync + 'static;

    /// Build the next-page request from the originating request and the
    /// continuation token returned by the current page.
    fn next_request(&self, origin: &Self::Request, token: &str) -> Self::Request;

    /// Parse one received response into a page of items plus the token
    /// for the page after it.
    ///
    /// # Errors
    /// Returns a parse error when the payload does not decode into the
    /// operation's page shape.
    fn parse_page(&self, parts: ResponseParts) -> NimbusResult<Page<Self::Item>>;
}
