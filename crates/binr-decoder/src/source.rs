use std::collections::VecDeque;
use std::future::{self, Future};
use std::io;

use bytes::Bytes;
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

use crate::config::ReaderConfig;

/// Producer of the chunks that make up a logical byte stream.
///
/// This is the only point where a read can suspend. Each call yields
///
/// ```text
///   Ok(Some(chunk))   next chunk, in stream order (may be empty)
///   Ok(None)          end of stream
///   Err(e)            the source failed; surfaced as DecodeError::Source
/// ```
///
/// The reading context calls `next_chunk` again only after it has fully
/// consumed the previous chunk, and never after `Ok(None)` or `Err`.
pub trait ByteSource {
  /// Pull the next chunk.
  fn next_chunk(&mut self) -> impl Future<Output = io::Result<Option<Bytes>>> + Send;
}

// ── In-memory ────────────────────────────────────────────────────────────────

/// A queue of chunks already held in memory.
///
/// Useful for tests and for payloads that arrived as a list of buffers.
/// The chunk boundaries are preserved exactly as given, which makes it
/// the tool of choice for exercising values that straddle chunks.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
  chunks: VecDeque<Bytes>,
}

impl MemorySource {
  /// Build a source yielding `chunks` in order.
  pub fn new<I, B>(chunks: I) -> Self
  where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
  {
    Self {
      chunks: chunks.into_iter().map(Into::into).collect(),
    }
  }

  /// A source yielding one chunk holding all of `bytes`.
  pub fn single(bytes: impl Into<Bytes>) -> Self {
    Self::new([bytes.into()])
  }

  /// A source yielding `bytes` cut into chunks of `chunk_size` bytes
  /// (the last one may be shorter). A `chunk_size` of 0 is treated as 1.
  pub fn split(bytes: impl Into<Bytes>, chunk_size: usize) -> Self {
    let mut bytes = bytes.into();
    let size = chunk_size.max(1);
    let mut chunks = VecDeque::with_capacity(bytes.len().div_ceil(size));
    while !bytes.is_empty() {
      let take = size.min(bytes.len());
      chunks.push_back(bytes.split_to(take));
    }
    Self { chunks }
  }

  /// Number of chunks not yet handed out.
  #[must_use]
  pub fn remaining_chunks(&self) -> usize {
    self.chunks.len()
  }
}

impl ByteSource for MemorySource {
  fn next_chunk(&mut self) -> impl Future<Output = io::Result<Option<Bytes>>> + Send {
    future::ready(Ok(self.chunks.pop_front()))
  }
}

// ── AsyncRead adapter ────────────────────────────────────────────────────────

/// Cuts any `AsyncRead` (file, socket, pipe) into chunks.
///
/// Each `next_chunk` issues a single read of at most
/// [`ReaderConfig::chunk_size`] bytes, so chunk boundaries follow
/// whatever the reader returns. A zero-byte read is end of stream.
pub struct ReaderSource<R> {
  reader: R,
  chunk_size: usize,
}

impl<R: AsyncRead + Unpin + Send> ReaderSource<R> {
  /// Wrap `reader` with the default configuration.
  pub fn new(reader: R) -> Self {
    Self::with_config(reader, ReaderConfig::default())
  }

  /// Wrap `reader` with an explicit configuration.
  pub fn with_config(reader: R, config: ReaderConfig) -> Self {
    Self {
      reader,
      chunk_size: config.effective_chunk_size(),
    }
  }

  /// Recover the underlying reader.
  pub fn into_inner(self) -> R {
    self.reader
  }
}

impl<R: AsyncRead + Unpin + Send> ByteSource for ReaderSource<R> {
  async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
    let mut buf = vec![0u8; self.chunk_size];
    let n = self.reader.read(&mut buf).await?;
    if n == 0 {
      debug!("reader source reached end of stream");
      return Ok(None);
    }
    buf.truncate(n);
    Ok(Some(Bytes::from(buf)))
  }
}

// ── Channel ──────────────────────────────────────────────────────────────────

/// Chunks pushed by a producer task through a bounded channel.
///
/// The stream ends when every sender has been dropped. A producer can
/// report a failure by sending `Err`, which fails the pending read.
///
/// ```text
///   producer task ──tx.send(Ok(chunk))──▶ ChannelSource ──▶ ReadingContext
/// ```
pub struct ChannelSource {
  rx: mpsc::Receiver<io::Result<Bytes>>,
}

impl ChannelSource {
  /// Wrap an existing receiver.
  #[must_use]
  pub fn new(rx: mpsc::Receiver<io::Result<Bytes>>) -> Self {
    Self { rx }
  }

  /// Create a channel with room for `capacity` in-flight chunks.
  ///
  /// # Panics
  ///
  /// Panics if `capacity` is 0, like [`tokio::sync::mpsc::channel`].
  #[must_use]
  pub fn channel(capacity: usize) -> (mpsc::Sender<io::Result<Bytes>>, Self) {
    let (tx, rx) = mpsc::channel(capacity);
    (tx, Self::new(rx))
  }
}

impl ByteSource for ChannelSource {
  async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
    self.rx.recv().await.transpose()
  }
}
