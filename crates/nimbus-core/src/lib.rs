//! Core building blocks shared by every Nimbus SDK service crate.
//!
//! This crate provides the foundation the generated service clients sit on:
//! the [`ByteStream`] body abstraction used for request and response
//! payloads, the [`NimbusError`] error taxonomy, client configuration, and
//! common type definitions.

mod byte_stream;
mod config;
mod error;
mod types;

pub use byte_stream::ByteStream;
pub use config::NimbusConfig;
pub use error::{NimbusError, NimbusResult};
pub use types::NimbusRegion;
