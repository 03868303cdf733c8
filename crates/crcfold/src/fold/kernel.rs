//! The two-lane fold, generic over the native primitives.
//!
//! ```text
//!            block = n * 16 bytes
//! ┌───────────── lane A ─────────────┬───────────── lane B ─────────────┐
//! │ w0  w1  ...               w(n-1) │ w0  w1  ...               w(n-1) │
//! └──────────────────────────────────┴──────────────────────────────────┘
//!   crcA = crc  ──step64──▶ ...          crcB = 0 ──step64──▶ ...
//!
//!   crc = step64(crcB, low64(clmul(crcA, table[n-1])) ^ B.w(n-1))
//! ```
//!
//! The two step chains are independent, so they overlap in the pipeline; one
//! carryless multiply shifts lane A past lane B's `n * 8` bytes.

use crate::native::{CarrylessMultiply, NativeStep};

/// Validated fold parameters; see `FoldEngine::with_table`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FoldParams<'t> {
  pub(crate) multipliers: &'t [u32],
  pub(crate) leaf_blocks: usize,
  pub(crate) max_blocks: usize,
}

/// Fold `data` into the raw register `previous`.
///
/// Stages: byte steps up to 8-byte alignment, two-lane blocks while at least a
/// leaf remains, then 8-byte words, then bytes.
#[inline(always)]
#[allow(clippy::indexing_slicing)] // n - 1 < max_blocks <= multipliers.len(), checked at construction
pub(crate) fn fold_kernel<K: NativeStep + CarrylessMultiply>(
  k: K,
  params: FoldParams<'_>,
  previous: u32,
  data: &[u8],
) -> u32 {
  let misalign = data.as_ptr().addr().wrapping_neg() & 7;
  let (head, mut rest) = data.split_at(misalign.min(data.len()));

  let mut crc = previous;
  for &byte in head {
    crc = k.step8(crc, byte);
  }
  let mut crc = u64::from(crc);

  let leaf_bytes = params.leaf_blocks * 16;
  while rest.len() >= leaf_bytes {
    let n = (rest.len() / 16).min(params.max_blocks);
    debug_assert!(n >= params.leaf_blocks && n <= params.multipliers.len());

    let (block, tail) = rest.split_at(n * 16);
    let (lane_a, lane_b) = block.split_at(n * 8);
    let (words_a, _) = lane_a.as_chunks::<8>();
    let (words_b, _) = lane_b.as_chunks::<8>();
    let (Some((last_a, body_a)), Some((last_b, body_b))) = (words_a.split_last(), words_b.split_last()) else {
      break;
    };

    let mut crc_a = crc;
    let mut crc_b = 0u64;
    for (a, b) in body_a.iter().zip(body_b) {
      crc_a = k.step64(crc_a, u64::from_le_bytes(*a));
      crc_b = k.step64(crc_b, u64::from_le_bytes(*b));
    }
    crc_a = k.step64(crc_a, u64::from_le_bytes(*last_a));

    let shifted = k.clmul(crc_a, u64::from(params.multipliers[n - 1])) as u64;
    crc = k.step64(crc_b, shifted ^ u64::from_le_bytes(*last_b));

    rest = tail;
  }

  let (words, bytes) = rest.as_chunks::<8>();
  for word in words {
    crc = k.step64(crc, u64::from_le_bytes(*word));
  }

  let mut crc = crc as u32;
  for &byte in bytes {
    crc = k.step8(crc, byte);
  }
  crc
}
