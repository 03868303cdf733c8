//! Generic slicing-by-N lookup table generation for reflected 32-bit CRCs.
//!
//! # Table Structure
//!
//! - Table 0: CRC contribution of each byte value (one byte of shifting)
//! - Table k: the same contribution shifted forward by `k` further bytes
//!
//! Slice-by-N reads tables `0..N`, so one set of 16 tables serves every
//! slicing width up to 16.

// SAFETY: indices are loop counters below 256 / N, or values masked with 0xFF.
#![allow(clippy::indexing_slicing)]

/// Byte-at-a-time table (table 0) for a reflected polynomial.
#[must_use]
pub const fn table_0_32(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }

  table
}

/// All `N` slicing tables for a reflected polynomial.
///
/// `tables[k][i] = (tables[k-1][i] >> 8) ^ tables[0][tables[k-1][i] & 0xFF]`.
#[must_use]
pub const fn slicing_tables_32<const N: usize>(poly: u32) -> [[u32; 256]; N] {
  let mut tables = [[0u32; 256]; N];
  if N == 0 {
    return tables;
  }

  tables[0] = table_0_32(poly);

  let mut t = 1;
  while t < N {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ tables[0][(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}
