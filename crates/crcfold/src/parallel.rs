//! Checksums over chunked data.
//!
//! `crc(A ++ B)` follows from `crc(A)`, `crc(B)` and `len(B)` in
//! O(log len(B)), so chunks can be hashed independently (on any thread pool)
//! and combined in order afterwards.
//!
//! ```
//! use crcfold::{Checksum, Crc32c, parallel::checksum_chunks};
//!
//! let data = b"The quick brown fox jumps over the lazy dog";
//! let chunks: Vec<&[u8]> = data.chunks(16).collect();
//! assert_eq!(checksum_chunks::<Crc32c>(&chunks), Crc32c::checksum(data));
//! ```
//!
//! With the `rayon` feature, [`par_checksum`] does the splitting on the
//! global rayon pool.

use traits::ChecksumCombine;

/// Checksum of the concatenation of `chunks`.
///
/// An empty slice yields the checksum of empty input.
#[inline]
pub fn checksum_chunks<C: ChecksumCombine>(chunks: &[&[u8]]) -> C::Output {
  let Some((first, rest)) = chunks.split_first() else {
    return C::checksum(&[]);
  };

  rest
    .iter()
    .fold(C::checksum(first), |acc, chunk| C::combine(acc, C::checksum(chunk), chunk.len()))
}

/// Combine `(checksum, length)` pairs, in order, into the checksum of the
/// concatenated data. Returns `None` for an empty slice.
///
/// ```
/// use crcfold::{Checksum, Crc32c, parallel::combine_checksums};
///
/// let (a, b) = b"hello world".split_at(6);
/// let parts = [(Crc32c::checksum(a), a.len()), (Crc32c::checksum(b), b.len())];
/// assert_eq!(combine_checksums::<Crc32c>(&parts), Some(Crc32c::checksum(b"hello world")));
/// assert_eq!(combine_checksums::<Crc32c>(&[]), None);
/// ```
#[inline]
pub fn combine_checksums<C: ChecksumCombine>(checksums: &[(C::Output, usize)]) -> Option<C::Output> {
  let ((first, _), rest) = checksums.split_first()?;
  Some(rest.iter().fold(*first, |acc, &(crc, len)| C::combine(acc, crc, len)))
}

/// Checksum of `data`, hashed in `chunk_size` pieces on the rayon pool.
///
/// A `chunk_size` of 0 hashes the whole buffer on the calling thread.
///
/// ```
/// use crcfold::{Checksum, Crc32c, parallel::par_checksum};
///
/// let data = vec![0xA5u8; 1 << 20];
/// assert_eq!(par_checksum::<Crc32c>(&data, 64 * 1024), Crc32c::checksum(&data));
/// ```
#[cfg(feature = "rayon")]
pub fn par_checksum<C>(data: &[u8], chunk_size: usize) -> C::Output
where
  C: ChecksumCombine,
  C::Output: Send,
{
  use alloc::vec::Vec;

  use rayon::prelude::*;

  if chunk_size == 0 || data.len() <= chunk_size {
    return C::checksum(data);
  }

  let parts: Vec<(C::Output, usize)> = data
    .par_chunks(chunk_size)
    .map(|chunk| (C::checksum(chunk), chunk.len()))
    .collect();

  #[cfg(feature = "tracing")]
  tracing::trace!(bytes = data.len(), chunk_size, chunks = parts.len(), "parallel checksum");

  combine_checksums::<C>(&parts).unwrap_or_else(|| C::checksum(&[]))
}
