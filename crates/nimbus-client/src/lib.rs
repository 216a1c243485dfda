//! Shared client runtime for generated Nimbus service crates.
//!
//! Every generated per-operation class layers over the small runtime in
//! this crate:
//!
//! - [`Transport`]: the capability boundary a real HTTP stack (or the
//!   in-crate [`MockTransport`]) plugs into.
//! - [`DeferredResponse`]: a dispatched call whose payload is parsed on
//!   first access, at most once.
//! - [`PagedResponse`]: a page of a multi-page listing that exposes the
//!   whole listing as one lazy, ordered item stream, speculatively
//!   fetching the next page while the current one is consumed.

mod mock;
mod page;
mod paginate;
mod response;
mod transport;

pub use mock::{MockResponse, MockTransport};
pub use page::{Page, PageCodec};
pub use paginate::{ItemStream, PagedResponse};
pub use response::DeferredResponse;
pub use transport::{RawResponse, ResponseFuture, ResponseParts, Transport};
