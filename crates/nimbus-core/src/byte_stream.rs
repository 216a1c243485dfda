//! Lazy byte stream abstraction for request and response bodies.
//!
//! [`ByteStream`] is a pull-based sequence of [`Bytes`] chunks with an
//! optional declared total length. Bodies may be in-memory, file-backed,
//! or produced incrementally by a caller-supplied stream; none of the
//! constructors force the payload into memory.
//!
//! Non-seekable sources are single-consumer and destructive: once a chunk
//! has been pulled it is gone, and a drained stream stays drained. An
//! empty chunk emitted before end-of-stream is surfaced to the caller
//! rather than skipped, so producers can use zero-length chunks to mark
//! boundaries; only [`ByteStream::collect_bytes`] and
//! [`ByteStream::collect_string`] erase chunk boundaries.

use std::fmt;
use std::path::Path;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use tokio::io::AsyncReadExt;

use crate::error::{NimbusError, NimbusResult};

/// Read size for file-backed streams.
const FILE_CHUNK_SIZE: usize = 64 * 1024;

/// A lazy, possibly unbounded sequence of byte chunks.
pub struct ByteStream {
    source: Source,
    known_length: Option<u64>,
    exhausted: bool,
}

enum Source {
    /// Fully in-memory payload, yielded as a single chunk.
    Buffered(Option<Bytes>),
    /// File-backed payload read in fixed-size chunks.
    File(tokio::fs::File),
    /// Caller-supplied chunk producer.
    Streamed(Pin<Box<dyn Stream<Item = NimbusResult<Bytes>> + Send>>),
}

impl ByteStream {
    /// Create an empty stream.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            source: Source::Buffered(None),
            known_length: Some(0),
            exhausted: false,
        }
    }

    /// Create a stream over a static byte slice.
    #[must_use]
    pub fn from_static(data: &'static [u8]) -> Self {
        Self::from(Bytes::from_static(data))
    }

    /// Create a stream backed by a file on disk.
    ///
    /// The total length is taken from file metadata up front; the contents
    /// are read lazily in fixed-size chunks.
    ///
    /// # Errors
    /// Returns a transport error if the file cannot be opened or its
    /// metadata cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> NimbusResult<Self> {
        let file = tokio::fs::File::open(path).await?;
        let len = file.metadata().await?.len();
        tracing::debug!(len, "opened file-backed byte stream");
        Ok(Self {
            source: Source::File(file),
            known_length: Some(len),
            exhausted: false,
        })
    }

    /// Create a stream from a caller-supplied chunk producer.
    ///
    /// The total length is unknown unless declared afterwards with
    /// [`ByteStream::with_known_length`].
    #[must_use]
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = NimbusResult<Bytes>> + Send + 'static,
    {
        Self {
            source: Source::Streamed(Box::pin(stream)),
            known_length: None,
            exhausted: false,
        }
    }

    /// Declare the total number of bytes this stream will produce.
    ///
    /// The caller is responsible for the declared value matching the sum
    /// of all chunk lengths.
    #[must_use]
    pub fn with_known_length(mut self, len: u64) -> Self {
        self.known_length = Some(len);
        self
    }

    /// The declared total size in bytes, if known up front.
    ///
    /// Never consumes chunks to compute the answer; producers that cannot
    /// predict their size report `None`.
    #[must_use]
    pub fn known_length(&self) -> Option<u64> {
        self.known_length
    }

    /// Pull the next chunk, or `None` at end of stream.
    ///
    /// The end state is idempotent: once `Ok(None)` has been returned,
    /// every later call returns `Ok(None)` again. A zero-length chunk is
    /// a legal intermediate result and does not signal the end.
    ///
    /// # Errors
    /// Propagates producer failures as transport errors; a failed stream
    /// is treated as exhausted.
    pub async fn next_chunk(&mut self) -> NimbusResult<Option<Bytes>> {
        if self.exhausted {
            return Ok(None);
        }
        let chunk = match &mut self.source {
            Source::Buffered(slot) => slot.take(),
            Source::File(file) => {
                let mut buf = vec![0u8; FILE_CHUNK_SIZE];
                let n = match file.read(&mut buf).await {
                    Ok(n) => n,
                    Err(err) => {
                        self.exhausted = true;
                        return Err(err.into());
                    }
                };
                if n == 0 {
                    None
                } else {
                    buf.truncate(n);
                    Some(Bytes::from(buf))
                }
            }
            Source::Streamed(stream) => match stream.next().await {
                Some(Ok(chunk)) => Some(chunk),
                Some(Err(err)) => {
                    self.exhausted = true;
                    return Err(err);
                }
                None => None,
            },
        };
        if chunk.is_none() {
            self.exhausted = true;
        }
        Ok(chunk)
    }

    /// Drain the stream and concatenate all chunks.
    ///
    /// # Errors
    /// Propagates the first producer failure.
    pub async fn collect_bytes(&mut self) -> NimbusResult<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Drain the stream into a UTF-8 string.
    ///
    /// A stream that produces nothing (or only empty chunks) drains to the
    /// empty string.
    ///
    /// # Errors
    /// Propagates producer failures; non-UTF-8 content is a parse error.
    pub async fn collect_string(&mut self) -> NimbusResult<String> {
        let bytes = self.collect_bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|err| NimbusError::parse(format!("body is not valid UTF-8: {err}")))
    }

    /// Expose the remaining chunks as a forward-only stream.
    ///
    /// The returned stream picks up at the current position; it cannot be
    /// rewound to the origin.
    pub fn into_chunk_stream(self) -> impl Stream<Item = NimbusResult<Bytes>> + Send {
        futures::stream::try_unfold(self, |mut body| async move {
            match body.next_chunk().await? {
                Some(chunk) => Ok(Some((chunk, body))),
                None => Ok(None),
            }
        })
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Buffered(_) => "buffered",
            Source::File(_) => "file",
            Source::Streamed(_) => "streamed",
        };
        f.debug_struct("ByteStream")
            .field("source", &source)
            .field("known_length", &self.known_length)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl From<Bytes> for ByteStream {
    fn from(data: Bytes) -> Self {
        let known_length = Some(data.len() as u64);
        let slot = if data.is_empty() { None } else { Some(data) };
        Self {
            source: Source::Buffered(slot),
            known_length,
            exhausted: false,
        }
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(data: Vec<u8>) -> Self {
        Self::from(Bytes::from(data))
    }
}

impl From<String> for ByteStream {
    fn from(data: String) -> Self {
        Self::from(Bytes::from(data))
    }
}

impl From<&'static str> for ByteStream {
    fn from(data: &'static str) -> Self {
        Self::from(Bytes::from_static(data.as_bytes()))
    }
}
