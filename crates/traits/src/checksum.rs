//! Checksum traits.

use core::fmt::Debug;

/// A streaming checksum.
///
/// ```rust,ignore
/// use crcfold::Crc32c;
/// use traits::Checksum;
///
/// let crc = Crc32c::checksum(b"123456789");
///
/// let mut hasher = Crc32c::new();
/// hasher.update(b"1234");
/// hasher.update(b"56789");
/// assert_eq!(hasher.finalize(), crc);
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must not consume or mutate state
/// - `reset()` must restore the hasher to its initial state
pub trait Checksum: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum value type.
  type Output: Copy + Eq + Debug + Default;

  /// Create a hasher with the algorithm's default initial value.
  #[must_use]
  fn new() -> Self;

  /// Create a hasher that continues from `initial`.
  #[must_use]
  fn with_initial(initial: Self::Output) -> Self;

  /// Feed more data.
  fn update(&mut self, data: &[u8]);

  /// Feed several buffers in order; equivalent to one `update` per buffer.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Checksum of everything fed so far.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Restore the hasher to its initial state.
  fn reset(&mut self);

  /// One-shot checksum of `data`.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// One-shot checksum of the concatenation of `bufs`.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }
}

/// Checksums whose values over adjacent buffers can be merged.
///
/// For CRCs this is linear algebra over GF(2):
///
/// ```text
/// crc(A ++ B) = shift(crc(A), 8 * len(B)) ^ crc(B)   (plus init/xorout correction)
/// ```
///
/// and `shift` is evaluated by square-and-multiply in O(log len(B)).
pub trait ChecksumCombine: Checksum {
  /// Given `crc_a = checksum(A)` and `crc_b = checksum(B)`, return `checksum(A ++ B)`.
  #[must_use]
  fn combine(crc_a: Self::Output, crc_b: Self::Output, len_b: usize) -> Self::Output;
}
