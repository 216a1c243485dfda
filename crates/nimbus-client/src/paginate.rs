//! Auto-paginating results with speculative next-page prefetch.
//!
//! A [`PagedResponse`] is one page of a multi-page listing plus enough
//! state to request the page after it: the originating request template,
//! the transport handle, and the operation's [`PageCodec`]. Its
//! [`items`](PagedResponse::items) stream presents the whole listing as a
//! single ordered sequence, fetching follow-up pages transparently.
//!
//! While the caller consumes a page, the next page's request is already
//! launched in the background. The bookkeeping is a single prefetch slot
//! per page: spawning the next-page task registers it, advancing past the
//! page takes it back out. Prefetching is purely a latency optimization —
//! item order is identical with it on or off, and a prefetched page that
//! fails keeps its error stored until iteration actually reaches it.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use nimbus_core::{NimbusError, NimbusResult};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::page::{Page, PageCodec};
use crate::response::DeferredResponse;
use crate::transport::Transport;

/// Lazy cross-page item sequence produced by [`PagedResponse::items`].
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = NimbusResult<T>> + Send>>;

/// At most one outstanding next-page call per page.
enum PrefetchSlot<C: PageCodec> {
    Idle,
    InFlight(JoinHandle<PagedResponse<C>>),
}

struct PagedInner<C: PageCodec> {
    response: DeferredResponse<Page<C::Item>>,
    request: C::Request,
    transport: Arc<dyn Transport<C::Request>>,
    codec: Arc<C>,
    prefetch_enabled: bool,
    prefetch: Mutex<PrefetchSlot<C>>,
}

impl<C: PageCodec> Drop for PagedInner<C> {
    fn drop(&mut self) {
        // An abandoned prefetch is cancelled; its outcome is never
        // surfaced anywhere.
        if let PrefetchSlot::InFlight(handle) = &*self.prefetch.lock() {
            handle.abort();
        }
    }
}

/// One page of a listing, exposing the listing as a lazy item stream.
///
/// Cheap to clone; clones share the page's resolution state and its
/// prefetch slot.
pub struct PagedResponse<C: PageCodec> {
    inner: Arc<PagedInner<C>>,
}

impl<C: PageCodec> PagedResponse<C> {
    /// Dispatch a listing request and wrap its first page.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport<C::Request>>,
        codec: Arc<C>,
        request: C::Request,
        prefetch_enabled: bool,
    ) -> Self {
        let response_future = transport.send(request.clone());
        let parse_codec = Arc::clone(&codec);
        let response =
            DeferredResponse::new(response_future, move |parts| parse_codec.parse_page(parts));
        Self {
            inner: Arc::new(PagedInner {
                response,
                request,
                transport,
                codec,
                prefetch_enabled,
                prefetch: Mutex::new(PrefetchSlot::Idle),
            }),
        }
    }

    /// Client-generated id of this page's call.
    #[must_use]
    pub fn request_id(&self) -> &str {
        self.inner.response.request_id()
    }

    /// This page, resolving it on first access.
    ///
    /// # Errors
    /// Re-raises the stored error of a failed resolution.
    pub async fn page(&self) -> NimbusResult<Arc<Page<C::Item>>> {
        self.inner.response.output().await
    }

    /// The items of this page only.
    ///
    /// # Errors
    /// Same contract as [`PagedResponse::page`].
    pub async fn page_items(&self) -> NimbusResult<Vec<C::Item>> {
        Ok(self.page().await?.items.clone())
    }

    /// The continuation token of this page; `None` on the final page.
    ///
    /// # Errors
    /// Same contract as [`PagedResponse::page`].
    pub async fn continuation_token(&self) -> NimbusResult<Option<String>> {
        Ok(self.page().await?.continuation_token.clone())
    }

    /// All items of this and every following page, as one lazy stream.
    ///
    /// Items are yielded strictly in page order and within-page order. A
    /// page's error surfaces only when the stream reaches that page, and
    /// ends the stream. Calling `items` again restarts from this page
    /// (already-resolved pages reuse their cached parse; later pages are
    /// fetched anew).
    #[must_use]
    pub fn items(&self) -> ItemStream<C::Item> {
        let state = IterState {
            current: self.clone(),
            page: None,
            index: 0,
        };
        Box::pin(futures::stream::try_unfold(state, |mut state| async move {
            match state.next_item().await? {
                Some(item) => Ok(Some((item, state))),
                None => Ok(None),
            }
        }))
    }

    /// Build the next page's call from this page's request and a token.
    fn next_page(&self, token: &str) -> Self {
        let request = self.inner.codec.next_request(&self.inner.request, token);
        Self::new(
            Arc::clone(&self.inner.transport),
            Arc::clone(&self.inner.codec),
            request,
            self.inner.prefetch_enabled,
        )
    }

    /// Launch the next page's call in the background and register it in
    /// the prefetch slot, unless one is already registered.
    ///
    /// The spawned task resolves the page so its payload is ready when
    /// the caller advances; a failure stays stored in the page until the
    /// caller actually reaches it.
    fn ensure_prefetch(&self, token: &str) {
        if !self.inner.prefetch_enabled {
            return;
        }
        let mut slot = self.inner.prefetch.lock();
        if matches!(*slot, PrefetchSlot::InFlight(_)) {
            return;
        }
        let next = self.next_page(token);
        debug!(request_id = %next.request_id(), token, "prefetching next page");
        let resolving = next.clone();
        let handle = tokio::spawn(async move {
            if let Err(error) = resolving.page().await {
                debug!(error = %error, "prefetched page failed; error stored until reached");
            }
            resolving
        });
        *slot = PrefetchSlot::InFlight(handle);
    }

    /// Move past this page: reconcile the prefetch slot, or fetch the
    /// next page synchronously on a miss.
    async fn advance(&self, token: &str) -> NimbusResult<Self> {
        let slot = std::mem::replace(&mut *self.inner.prefetch.lock(), PrefetchSlot::Idle);
        match slot {
            PrefetchSlot::InFlight(handle) => {
                debug!(token, "advancing to prefetched page");
                handle
                    .await
                    .map_err(|err| NimbusError::usage(format!("prefetch task failed: {err}")))
            }
            PrefetchSlot::Idle => {
                debug!(token, "fetching next page");
                Ok(self.next_page(token))
            }
        }
    }
}

impl<C: PageCodec> Clone for PagedResponse<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: PageCodec> fmt::Debug for PagedResponse<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedResponse")
            .field("response", &self.inner.response)
            .field("prefetch_enabled", &self.inner.prefetch_enabled)
            .finish()
    }
}

/// Cursor state of one `items` iteration.
struct IterState<C: PageCodec> {
    current: PagedResponse<C>,
    page: Option<Arc<Page<C::Item>>>,
    index: usize,
}

impl<C: PageCodec> IterState<C> {
    async fn next_item(&mut self) -> NimbusResult<Option<C::Item>> {
        loop {
            if self.page.is_none() {
                let page = self.current.page().await?;
                if let Some(token) = &page.continuation_token {
                    self.current.ensure_prefetch(token);
                }
                self.page = Some(page);
            }
            let Some(page) = &self.page else {
                continue;
            };
            if self.index < page.items.len() {
                let item = page.items[self.index].clone();
                self.index += 1;
                return Ok(Some(item));
            }
            let Some(token) = page.continuation_token.clone() else {
                return Ok(None);
            };
            let next = self.current.advance(&token).await?;
            self.current = next;
            self.page = None;
            self.index = 0;
        }
    }
}
