/// Default chunk size for [`ReaderSource`](crate::ReaderSource): 8 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration for sources that cut an `AsyncRead` into chunks.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────┐
/// │ Field      │ Purpose                                          │
/// ├────────────┼──────────────────────────────────────────────────┤
/// │ chunk_size │ Upper bound on bytes requested per read call.    │
/// │            │ A read may return fewer. Values below 1 are      │
/// │            │ treated as 1.                                    │
/// └────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// The chunk size only affects how often the source is polled; decoded
/// values are identical for every chunk size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
  pub chunk_size: usize,
}

impl ReaderConfig {
  /// Configuration with the given chunk size.
  #[must_use]
  pub fn with_chunk_size(chunk_size: usize) -> Self {
    Self { chunk_size }
  }

  /// Chunk size actually used: `chunk_size`, but never zero.
  #[must_use]
  pub fn effective_chunk_size(&self) -> usize {
    self.chunk_size.max(1)
  }
}

impl Default for ReaderConfig {
  fn default() -> Self {
    Self {
      chunk_size: DEFAULT_CHUNK_SIZE,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_chunk_size() {
    assert_eq!(ReaderConfig::default().effective_chunk_size(), 8192);
  }

  #[test]
  fn zero_is_clamped() {
    assert_eq!(ReaderConfig::with_chunk_size(0).effective_chunk_size(), 1);
  }
}
