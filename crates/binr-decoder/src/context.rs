use binr_types::{Decoder, Framing, Parameterized, TypeError};
use bytes::Bytes;
use log::{debug, trace, warn};

use crate::error::DecodeError;
use crate::source::ByteSource;

/// Upper bound on the up-front allocation made by `read_array`, so a
/// huge count read from untrusted input cannot reserve memory before the
/// bytes backing it have arrived.
const PREALLOC_LIMIT: usize = 4096;

/// Lifecycle of a reading context.
///
/// ```text
///   Ready ──read()──▶ Pending ──ok / type error──▶ Ready
///                        │
///                        ├──end of stream / source error──▶ Failed
///                        └──future dropped──────────────────(stays Pending)
/// ```
///
/// Anything other than `Ready` at the start of a read means the cursor
/// and carry buffer can no longer be trusted, so the read is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContextState {
  Ready,
  Pending,
  Failed,
}

/// Where the bytes of the value being decoded live.
///
/// When a value fits inside the active chunk it is decoded straight from
/// the chunk; only values that straddle a boundary go through the carry
/// buffer.
#[derive(Clone, Copy, Debug)]
enum Window {
  Chunk { start: usize, end: usize },
  Carry,
}

/// Cursor and continuation engine over a chunked byte stream.
///
/// A `ReadingContext` owns one [`ByteSource`] for the length of a
/// decoding session. Each read asks a [`Decoder`] how its value is
/// framed, assembles exactly those bytes (pulling further chunks when the
/// active one runs dry) and hands the assembled window to the decoder.
///
/// ```text
///            chunk k               chunk k+1
///   ┌───────────────────┐   ┌────────────────────┐
///   │ ... consumed │ a b│   │ c d │ next values...│
///   └───────────────────┘   └────────────────────┘
///                    ▲  ╲      ╱
///                 offset  carry = [a b c d]  ──▶ decoder.decode()
/// ```
///
/// Guarantees: every byte is consumed exactly once, none is skipped,
/// values are decoded in stream order, and at most the active chunk plus
/// the carry buffer (never more than the pending value's bytes) are held.
///
/// Reads take `&mut self`, so they are serialized by construction. The
/// only suspension point is [`ByteSource::next_chunk`].
///
/// # Example
///
/// ```rust
/// use binr_decoder::{MemorySource, ReadingContext};
/// use binr_types::{Int8, LeInt16};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let source = MemorySource::new([vec![0x00, 0x7F, 0xFF, 0x34], vec![0x12]]);
/// let mut ctx = ReadingContext::new(source);
///
/// assert_eq!(ctx.read_array(&Int8, 3).await.unwrap(), vec![0, 127, -1]);
/// // 0x34 | 0x12 straddles the chunk boundary
/// assert_eq!(ctx.read(&LeInt16).await.unwrap(), 0x1234);
/// # });
/// ```
pub struct ReadingContext<S> {
  source: S,
  /// Active chunk. `offset == chunk.len()` means it is spent.
  chunk: Bytes,
  offset: usize,
  /// Bytes of the pending value gathered from earlier chunks.
  carry: Vec<u8>,
  /// Total bytes consumed from the stream.
  position: u64,
  /// The source has reported end of stream.
  exhausted: bool,
  state: ContextState,
}

impl<S: ByteSource> ReadingContext<S> {
  /// Create a context reading from `source`.
  ///
  /// No chunk is pulled until the first read.
  pub fn new(source: S) -> Self {
    Self {
      source,
      chunk: Bytes::new(),
      offset: 0,
      carry: Vec::new(),
      position: 0,
      exhausted: false,
      state: ContextState::Ready,
    }
  }

  /// Number of bytes consumed so far.
  #[must_use]
  pub fn position(&self) -> u64 {
    self.position
  }

  /// Recover the byte source, discarding any unread bytes of the
  /// active chunk.
  pub fn into_source(self) -> S {
    self.source
  }

  /// Decode one value.
  ///
  /// # Errors
  ///
  /// - [`DecodeError::UnexpectedEndOfStream`] if the source ends before
  ///   the value is complete.
  /// - [`DecodeError::Source`] if the source fails.
  /// - [`DecodeError::Poisoned`] if an earlier read failed or was
  ///   cancelled.
  /// - [`DecodeError::Type`] if the decoder rejects its bytes.
  pub async fn read<D: Decoder>(&mut self, decoder: &D) -> Result<D::Output, DecodeError> {
    self.begin()?;
    let result = self.read_value(decoder).await;
    self.carry.clear();
    self.settle(&result);
    result
  }

  /// Bind `args` to a parameterized decoder, then decode one value with
  /// the resulting decoder.
  ///
  /// Argument validation happens before any byte is consumed.
  ///
  /// # Errors
  ///
  /// [`DecodeError::Type`] wrapping [`TypeError::InvalidArgument`] if
  /// binding fails; otherwise as [`read`](Self::read).
  pub async fn read_with_args<P: Parameterized>(
    &mut self,
    decoder: &P,
    args: P::Args,
  ) -> Result<<P::Bound as Decoder>::Output, DecodeError> {
    let bound = decoder.bind(args)?;
    self.read(&bound).await
  }

  /// Decode `count` values in stream order with the same decoder.
  ///
  /// `count == 0` returns an empty vector without touching the source.
  /// The first failing element fails the whole array; no partial result
  /// is returned.
  ///
  /// # Errors
  ///
  /// As [`read`](Self::read), for the first element that fails.
  pub async fn read_array<D: Decoder>(
    &mut self,
    decoder: &D,
    count: usize,
  ) -> Result<Vec<D::Output>, DecodeError> {
    let mut values = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
      values.push(self.read(decoder).await?);
    }
    Ok(values)
  }

  /// Consume and discard `n` bytes.
  ///
  /// Skipped bytes are never buffered, however many chunks they span.
  ///
  /// # Errors
  ///
  /// As [`read`](Self::read), minus the decoder errors.
  pub async fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
    self.begin()?;
    let result = self.discard(n).await;
    self.settle(&result);
    result
  }

  /// Report whether the stream has no bytes left.
  ///
  /// If the active chunk is spent this pulls the next non-empty chunk
  /// and keeps it for subsequent reads, so no byte is lost.
  ///
  /// # Errors
  ///
  /// [`DecodeError::Source`] if the pull fails, [`DecodeError::Poisoned`]
  /// if the context is unusable.
  pub async fn at_end(&mut self) -> Result<bool, DecodeError> {
    self.begin()?;
    let result = if self.remaining() > 0 {
      Ok(false)
    } else {
      self.pull().await.map(|more| !more)
    };
    self.settle(&result);
    result
  }

  // ── State bookkeeping ──────────────────────────────────────────────────────

  fn begin(&mut self) -> Result<(), DecodeError> {
    if self.state != ContextState::Ready {
      return Err(DecodeError::Poisoned);
    }
    self.state = ContextState::Pending;
    Ok(())
  }

  fn settle<T>(&mut self, result: &Result<T, DecodeError>) {
    self.state = match result {
      Ok(_) | Err(DecodeError::Type(_)) => ContextState::Ready,
      Err(e) => {
        warn!("reading context failed at offset {}: {e}", self.position);
        ContextState::Failed
      }
    };
  }

  // ── Byte assembly ──────────────────────────────────────────────────────────

  async fn read_value<D: Decoder>(&mut self, decoder: &D) -> Result<D::Output, DecodeError> {
    let start = self.position;
    let window = match decoder.framing() {
      Framing::Fixed(len) => self.take(start, len).await?,
      Framing::Delimited {
        unit,
        max_units,
        eos_terminates,
      } => {
        self
          .take_delimited(decoder, start, unit, max_units, eos_terminates)
          .await?
      }
    };

    Ok(decoder.decode(self.window(window))?)
  }

  /// Assemble exactly `len` bytes.
  async fn take(&mut self, start: u64, len: usize) -> Result<Window, DecodeError> {
    if self.remaining() >= len {
      let from = self.offset;
      self.advance(len);
      return Ok(Window::Chunk {
        start: from,
        end: from + len,
      });
    }

    trace!("value at offset {start} spans chunks ({len} bytes)");
    if self.fill_carry(len).await? {
      Ok(Window::Carry)
    } else {
      Err(self.end_of_stream(start, len))
    }
  }

  /// Assemble units until the decoder marks one as the last.
  async fn take_delimited<D: Decoder>(
    &mut self,
    decoder: &D,
    start: u64,
    unit: usize,
    max_units: Option<usize>,
    eos_terminates: bool,
  ) -> Result<Window, DecodeError> {
    let unit = unit.max(1);
    let mut units = 0usize;
    // eos_terminates: a clean end of stream closes the value, even before
    // its first unit.

    loop {
      if let Some(limit) = max_units.filter(|&limit| units >= limit) {
        return Err(
          TypeError::ValueTooLong {
            decoder: decoder.name(),
            limit,
          }
          .into(),
        );
      }

      let unit_start = self.carry.len();
      if !self.fill_carry(unit_start + unit).await? {
        let partial = self.carry.len() - unit_start;
        if partial == 0 && eos_terminates {
          return Ok(Window::Carry);
        }
        return Err(self.end_of_stream(start, unit_start + unit));
      }

      units += 1;
      if decoder.ends_value(&self.carry[unit_start..]) {
        return Ok(Window::Carry);
      }
    }
  }

  /// Append bytes to the carry buffer until it holds `target` bytes.
  ///
  /// Returns `false` if the source ended first; the carry buffer then
  /// holds everything that was available.
  async fn fill_carry(&mut self, target: usize) -> Result<bool, DecodeError> {
    while self.carry.len() < target {
      if self.remaining() == 0 && !self.pull().await? {
        return Ok(false);
      }
      let take = (target - self.carry.len()).min(self.remaining());
      self
        .carry
        .extend_from_slice(&self.chunk[self.offset..self.offset + take]);
      self.advance(take);
    }
    Ok(true)
  }

  async fn discard(&mut self, n: usize) -> Result<(), DecodeError> {
    let start = self.position;
    let mut left = n;
    while left > 0 {
      if self.remaining() == 0 && !self.pull().await? {
        return Err(DecodeError::UnexpectedEndOfStream {
          offset: start,
          needed: n,
          available: n - left,
        });
      }
      let take = left.min(self.remaining());
      self.advance(take);
      left -= take;
    }
    Ok(())
  }

  /// Replace the spent chunk with the next non-empty one.
  ///
  /// Returns `false` at end of stream.
  async fn pull(&mut self) -> Result<bool, DecodeError> {
    debug_assert_eq!(self.remaining(), 0, "pulled with bytes left in the chunk");
    if self.exhausted {
      return Ok(false);
    }

    loop {
      match self.source.next_chunk().await.map_err(DecodeError::Source)? {
        Some(chunk) if chunk.is_empty() => {}
        Some(chunk) => {
          debug!(
            "pulled chunk of {} bytes at offset {}",
            chunk.len(),
            self.position
          );
          self.chunk = chunk;
          self.offset = 0;
          return Ok(true);
        }
        None => {
          debug!("byte source ended at offset {}", self.position);
          self.exhausted = true;
          self.chunk = Bytes::new();
          self.offset = 0;
          return Ok(false);
        }
      }
    }
  }

  fn remaining(&self) -> usize {
    self.chunk.len() - self.offset
  }

  fn advance(&mut self, n: usize) {
    self.offset += n;
    self.position += n as u64;
  }

  fn window(&self, window: Window) -> &[u8] {
    match window {
      Window::Chunk { start, end } => &self.chunk[start..end],
      Window::Carry => &self.carry,
    }
  }

  fn end_of_stream(&self, offset: u64, needed: usize) -> DecodeError {
    DecodeError::UnexpectedEndOfStream {
      offset,
      needed,
      available: self.carry.len(),
    }
  }
}
