//! Client for the Nimbus Storage service.
//!
//! [`StorageClient`] is the generated operation surface: each method
//! builds a typed request, hands it to the configured transport, and
//! wraps the in-flight call in the runtime's deferred or paginated
//! response types.

mod client;
mod codec;
mod request;

pub use client::StorageClient;
pub use codec::ListBlobsCodec;
pub use request::StorageRequest;
