//! Software emulation of the native primitives.
//!
//! Bit-identical to the hardware instructions: `step8` is one table-0 lookup,
//! `step64` is one slicing-by-8 round, `clmul` is a shift-and-xor loop.

// SAFETY: table indices are u8 values (< 256); table rows are constant 0..8.
#![allow(clippy::indexing_slicing)]

use super::{CarrylessMultiply, NativeStep};
use crate::{
  constants::{crc32c::TABLES, gf2},
  tabular::crc32c_step8,
};

/// Table-driven primitives; available on every target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Portable;

impl NativeStep for Portable {
  #[inline(always)]
  fn step8(self, crc: u32, byte: u8) -> u32 {
    crc32c_step8(crc, byte)
  }

  #[inline(always)]
  fn step64(self, crc: u64, word: u64) -> u64 {
    let t = &TABLES.0;
    let v = word ^ (crc & 0xFFFF_FFFF);
    let next = t[7][(v & 0xFF) as usize]
      ^ t[6][((v >> 8) & 0xFF) as usize]
      ^ t[5][((v >> 16) & 0xFF) as usize]
      ^ t[4][((v >> 24) & 0xFF) as usize]
      ^ t[3][((v >> 32) & 0xFF) as usize]
      ^ t[2][((v >> 40) & 0xFF) as usize]
      ^ t[1][((v >> 48) & 0xFF) as usize]
      ^ t[0][(v >> 56) as usize];
    u64::from(next)
  }
}

impl CarrylessMultiply for Portable {
  #[inline(always)]
  fn clmul(self, a: u64, b: u64) -> u128 {
    gf2::clmul64(a, b)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_portable_primitives() {
    crate::native::tests::check_primitives(Portable);
  }
}
