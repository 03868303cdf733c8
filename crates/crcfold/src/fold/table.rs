//! Fold multiplier table.
//!
//! Entry `i` is the LFSR register after `64 * i` single-bit shifts of the
//! CRC-32C polynomial, starting from `1`. In polynomial terms it is
//! `reflect32(x^(64 * (i + 1) - 33) mod P)`: the reflected carryless product
//! adds `x^1` and the trailing `step64` adds `x^32`, so
//! `step64(0, clmul(crc, table[i]))` moves `crc` forward by `i + 1` eight-byte
//! words. Entry 0 is the scaled encoding of `x^64`, not the identity.
//!
//! The shared table is const-evaluated; custom-sized tables can be built at
//! runtime (with `alloc`).

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::fmt;

use crate::constants::crc32c::POLYNOMIAL;

/// Minimum block count (16-byte units) per fold step by default: a 112-byte leaf.
pub const DEFAULT_LEAF_BLOCKS: usize = 7;

/// Maximum block count (16-byte units) per fold step by default: a 2 KiB block.
pub const DEFAULT_MAX_BLOCKS: usize = 128;

const SHARED_LEN: usize = 2 * DEFAULT_MAX_BLOCKS;

static SHARED_ENTRIES: [u32; SHARED_LEN] = multiplier_entries::<SHARED_LEN>();

static SHARED: ConstantTable = ConstantTable::from_static(&SHARED_ENTRIES);

/// 64 reflected LFSR shifts.
#[inline(always)]
const fn advance_word(mut r: u32) -> u32 {
  let mut i = 0;
  while i < 64 {
    r = if r & 1 != 0 { (r >> 1) ^ POLYNOMIAL } else { r >> 1 };
    i += 1;
  }
  r
}

/// The first `LEN` fold multipliers, evaluated at compile time.
#[must_use]
#[allow(clippy::indexing_slicing)] // i < LEN
pub const fn multiplier_entries<const LEN: usize>() -> [u32; LEN] {
  let mut out = [0u32; LEN];
  let mut r = 1u32;
  let mut i = 0;
  while i < LEN {
    out[i] = r;
    r = advance_word(r);
    i += 1;
  }
  out
}

#[derive(Clone)]
enum Entries {
  Static(&'static [u32]),
  #[cfg(feature = "alloc")]
  Owned(Vec<u32>),
}

/// Immutable fold multipliers indexed by `block_count - 1`.
#[derive(Clone)]
pub struct ConstantTable {
  entries: Entries,
}

impl ConstantTable {
  /// The process-wide table: `2 * DEFAULT_MAX_BLOCKS` entries, built at compile time.
  #[inline]
  #[must_use]
  pub fn shared() -> &'static Self {
    &SHARED
  }

  /// Wrap precomputed entries.
  ///
  /// The entries are trusted; a table whose values differ from
  /// [`multiplier_entries`] yields wrong checksums.
  #[inline]
  #[must_use]
  pub const fn from_static(entries: &'static [u32]) -> Self {
    Self {
      entries: Entries::Static(entries),
    }
  }

  /// Build a table serving up to `2 * max_blocks` block counts.
  ///
  /// Deterministic and prefix-stable: `build(n)[i] == build(m)[i]` for every
  /// `i < 2n` and `m > n`.
  #[cfg(feature = "alloc")]
  #[must_use]
  pub fn build(max_blocks: usize) -> Self {
    let len = max_blocks.saturating_mul(2);
    let mut entries = Vec::with_capacity(len);
    let mut r = 1u32;
    for _ in 0..len {
      entries.push(r);
      r = advance_word(r);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(max_blocks, entries = len, "built fold constant table");

    Self {
      entries: Entries::Owned(entries),
    }
  }

  /// All multipliers, entry `i` serving `i + 1` blocks.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u32] {
    match &self.entries {
      Entries::Static(s) => s,
      #[cfg(feature = "alloc")]
      Entries::Owned(v) => v,
    }
  }

  /// The largest block count this table can serve.
  #[inline]
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.as_slice().len()
  }

  /// The multiplier for a fold over `blocks` 16-byte units, if in range.
  #[inline]
  #[must_use]
  pub fn multiplier(&self, blocks: usize) -> Option<u32> {
    let index = blocks.checked_sub(1)?;
    self.as_slice().get(index).copied()
  }
}

impl PartialEq for ConstantTable {
  fn eq(&self, other: &Self) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl Eq for ConstantTable {}

impl fmt::Debug for ConstantTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConstantTable")
      .field("capacity", &self.capacity())
      .field("owned", &!matches!(self.entries, Entries::Static(_)))
      .finish_non_exhaustive()
  }
}

/// Build a fold multiplier table for up to `2 * max_blocks` block counts.
#[cfg(feature = "alloc")]
#[inline]
#[must_use]
pub fn build_constant_table(max_blocks: usize) -> ConstantTable {
  ConstantTable::build(max_blocks)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::{
    crc32c::POLY_FULL,
    gf2::{reflect32, xpow_mod_32},
  };

  #[test]
  fn test_known_entries() {
    let t = ConstantTable::shared().as_slice();
    assert_eq!(t.len(), 256);
    assert_eq!(t[0], 0x0000_0001);
    assert_eq!(t[1], 0x493C_7D27);
    assert_eq!(t[2], 0xF20C_0DFE);
    assert_eq!(t[3], 0xBA4F_C28E);
    assert_eq!(t[127], 0x1700_76FA);
    assert_eq!(t[255], 0xA51B_6135);
  }

  #[test]
  fn test_entries_match_gf2_exponentiation() {
    for (i, &entry) in ConstantTable::shared().as_slice().iter().enumerate() {
      let exponent = 64 * (i as u32 + 1) - 33;
      let want = reflect32(xpow_mod_32(exponent, POLY_FULL) as u32);
      assert_eq!(entry, want, "entry {i}");
    }
  }

  #[test]
  fn test_entry_zero_is_not_identity() {
    let identity = reflect32(1);
    assert_eq!(identity, 0x8000_0000);
    assert_ne!(ConstantTable::shared().as_slice()[0], identity);
  }

  #[cfg(feature = "alloc")]
  #[test]
  fn test_build_matches_shared() {
    assert_eq!(&build_constant_table(DEFAULT_MAX_BLOCKS), ConstantTable::shared());
  }

  #[cfg(feature = "alloc")]
  #[test]
  fn test_build_is_prefix_stable() {
    let small = ConstantTable::build(3);
    let large = ConstantTable::build(200);
    assert_eq!(small.capacity(), 6);
    assert_eq!(large.capacity(), 400);
    assert_eq!(small.as_slice(), &large.as_slice()[..6]);
    assert_eq!(ConstantTable::build(7), ConstantTable::build(7));
  }

  #[cfg(feature = "alloc")]
  #[test]
  fn test_build_zero() {
    let empty = ConstantTable::build(0);
    assert_eq!(empty.capacity(), 0);
    assert_eq!(empty.multiplier(1), None);
  }

  #[test]
  fn test_multiplier_lookup() {
    let t = ConstantTable::shared();
    assert_eq!(t.multiplier(0), None);
    assert_eq!(t.multiplier(1), Some(1));
    assert_eq!(t.multiplier(4), Some(0xBA4F_C28E));
    assert_eq!(t.multiplier(256), Some(0xA51B_6135));
    assert_eq!(t.multiplier(257), None);
  }

  #[test]
  fn test_from_static_round_trip() {
    static FIRST: [u32; 8] = multiplier_entries::<8>();
    let t = ConstantTable::from_static(&FIRST);
    assert_eq!(t.capacity(), 8);
    assert_eq!(t.as_slice(), &ConstantTable::shared().as_slice()[..8]);
  }
}
