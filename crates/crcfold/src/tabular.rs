//! Table-driven slice-by-N CRC.
//!
//! Slice-by-N consumes N bytes per iteration with N lookups into N tables of
//! 256 entries. The first four bytes of each chunk are XORed with the CRC
//! register (it is only 32 bits wide); later bytes index their tables
//! directly. Tail bytes fall back to byte-at-a-time with table 0.
//!
//! | N | Tables | Bytes/iter |
//! |---|--------|------------|
//! | 1 | 1 KiB  | 1  |
//! | 2 | 2 KiB  | 2  |
//! | 4 | 4 KiB  | 4  |
//! | 8 | 8 KiB  | 8  |
//! | 16 | 16 KiB | 16 |

// SAFETY: table indices are u8 values (< 256); row indices are below N, and
// callers guarantee `tables.len() >= N`.
#![allow(clippy::indexing_slicing)]

use crate::constants::{crc32c, tables::slicing_tables_32};

/// Slice-by-N over the first `N` rows of `tables`.
///
/// # Panics
///
/// Panics if `tables.len() < N`, and at compile time if `N == 0`.
#[inline]
#[must_use]
pub fn slice_by<const N: usize>(tables: &[[u32; 256]], mut crc: u32, data: &[u8]) -> u32 {
  let (chunks, remainder) = data.as_chunks::<N>();

  for chunk in chunks {
    // Register bytes that do not meet a data byte in this chunk are shifted
    // through unchanged.
    let mut next = if N < 4 { crc.checked_shr(8 * N as u32).unwrap_or(0) } else { 0 };
    for (j, &byte) in chunk.iter().enumerate() {
      let index = if j < 4 { byte ^ (crc >> (8 * j)) as u8 } else { byte };
      next ^= tables[N - 1 - j][index as usize];
    }
    crc = next;
  }

  for &byte in remainder {
    crc = (crc >> 8) ^ tables[0][(crc as u8 ^ byte) as usize];
  }

  crc
}

/// Slice-by-N tables for an arbitrary reflected 32-bit polynomial.
///
/// ```
/// use crcfold::tabular::SlicingTables;
///
/// // CRC-32 (IEEE), standard init/xorout.
/// static IEEE: SlicingTables<8> = SlicingTables::new(0xEDB8_8320);
/// assert_eq!(IEEE.update(!0, b"123456789") ^ !0, 0xCBF4_3926);
/// ```
#[derive(Clone)]
pub struct SlicingTables<const N: usize> {
  poly: u32,
  tables: [[u32; 256]; N],
}

impl<const N: usize> SlicingTables<N> {
  /// Build the tables for `poly` (reflected form).
  #[must_use]
  pub const fn new(poly: u32) -> Self {
    const { assert!(N >= 1, "slice-by-0 is meaningless") };
    Self {
      poly,
      tables: slicing_tables_32::<N>(poly),
    }
  }

  /// The reflected polynomial these tables were built for.
  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> u32 {
    self.poly
  }

  /// Advance the raw register `crc` over `data`.
  #[inline]
  #[must_use]
  pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
    slice_by::<N>(&self.tables, crc, data)
  }
}

impl<const N: usize> core::fmt::Debug for SlicingTables<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("SlicingTables")
      .field("n", &N)
      .field("poly", &format_args!("{:#010x}", self.poly))
      .finish_non_exhaustive()
  }
}

/// CRC-32C slice-by-N over the shared 16-row table set.
#[inline]
#[must_use]
pub fn crc32c_slice_by<const N: usize>(crc: u32, data: &[u8]) -> u32 {
  const { assert!(N >= 1 && N <= 16, "CRC-32C tables have 16 rows") };
  slice_by::<N>(&crc32c::TABLES.0, crc, data)
}

/// One CRC-32C byte step through table 0.
#[inline(always)]
#[must_use]
pub fn crc32c_step8(crc: u32, byte: u8) -> u32 {
  (crc >> 8) ^ crc32c::TABLES.0[0][(crc as u8 ^ byte) as usize]
}
