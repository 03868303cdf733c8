//! Native CRC-32C primitives.
//!
//! Two seams, implemented once per instruction set:
//!
//! - [`NativeStep`]: advance a CRC-32C register by one byte or one 64-bit
//!   word (`crc32` on x86_64, `crc32c{b,x}` on aarch64, tables otherwise).
//! - [`CarrylessMultiply`]: 64x64 -> 128-bit GF(2) product (`PCLMULQDQ`,
//!   `PMULL`, or a software loop).
//!
//! Hardware implementors are zero-sized tokens that can only be obtained after
//! the required CPU features have been detected, so calling their safe methods
//! is sound.

mod portable;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;
#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

pub use portable::Portable;

/// One CRC-32C update step under the hard-wired polynomial `0x82F63B78`.
pub trait NativeStep: Copy {
  /// Advance `crc` over one byte.
  fn step8(self, crc: u32, byte: u8) -> u32;

  /// Advance `crc` over one little-endian 64-bit word.
  ///
  /// Only the low 32 bits of `crc` are read; the high 32 bits of the result
  /// are zero.
  fn step64(self, crc: u64, word: u64) -> u64;
}

/// Carryless (GF(2)) 64x64 -> 128-bit multiplication.
pub trait CarrylessMultiply: Copy {
  fn clmul(self, a: u64, b: u64) -> u128;
}

/// Single lane, one [`NativeStep::step8`] per byte.
#[inline(always)]
pub(crate) fn bytewise<K: NativeStep>(k: K, mut crc: u32, data: &[u8]) -> u32 {
  for &byte in data {
    crc = k.step8(crc, byte);
  }
  crc
}

/// Single lane, one [`NativeStep::step64`] per 8-byte word, then byte tail.
#[inline(always)]
pub(crate) fn wordwise<K: NativeStep>(k: K, crc: u32, data: &[u8]) -> u32 {
  let (words, tail) = data.as_chunks::<8>();
  let mut state = u64::from(crc);
  for word in words {
    state = k.step64(state, u64::from_le_bytes(*word));
  }
  bytewise(k, state as u32, tail)
}
