//! Bit-serial reference implementations.
//!
//! These are the source of truth: one LFSR shift per input bit, no tables, no
//! hardware. Every other strategy must match them bit-for-bit. Both functions
//! are generic over the reflected 32-bit polynomial and return the raw
//! register (no final XOR).
//!
//! They are intentionally slow (~8 operations per bit); use them as test
//! oracles and as the baseline in the harness.

// SAFETY: indices are bounded by `data.len()` in the loop condition.
#![allow(clippy::indexing_slicing)]

/// Bitwise CRC-32 (reflected, LSB-first) with a data-dependent branch per bit.
#[must_use]
pub const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i: usize = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// Bitwise CRC-32 where the conditional XOR is a mask instead of a branch.
///
/// `(crc & 1).wrapping_neg()` is all-ones when the low bit is set.
#[must_use]
pub const fn crc32_bitwise_branchless(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i: usize = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = (crc >> 1) ^ ((crc & 1).wrapping_neg() & poly);
      bit += 1;
    }
    i += 1;
  }
  crc
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Verification
// ─────────────────────────────────────────────────────────────────────────────

use crate::constants::crc32c::{CHECK, CHECK_RAW, POLYNOMIAL};

const CHECK_INPUT: &[u8] = b"123456789";

const _: () = assert!(crc32_bitwise(POLYNOMIAL, 0, CHECK_INPUT) == CHECK_RAW);
const _: () = assert!(crc32_bitwise_branchless(POLYNOMIAL, 0, CHECK_INPUT) == CHECK_RAW);
const _: () = assert!(crc32_bitwise(POLYNOMIAL, !0, CHECK_INPUT) ^ !0 == CHECK);
// CRC-32 (IEEE): the oracles are polynomial-generic.
const _: () = assert!(crc32_bitwise(0xEDB8_8320, !0, CHECK_INPUT) ^ !0 == 0xCBF4_3926);
