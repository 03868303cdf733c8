//! aarch64 native primitives: ARMv8 CRC extension + PMULL.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cd, vmull_p64};

use platform::caps::aarch64;

use super::{CarrylessMultiply, NativeStep};
use crate::fold::{FoldParams, fold_kernel};

/// Proof that the CRC extension and PMULL are usable on this CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrcPmull {
  _detected: (),
}

impl CrcPmull {
  /// The token, if the running CPU has both features.
  #[must_use]
  pub(crate) fn detect() -> Option<Self> {
    platform::caps().has(aarch64::FOLD_READY).then_some(Self { _detected: () })
  }

  /// # Safety
  /// Caller must ensure the CPU supports `crc` and `aes`.
  #[inline(always)]
  const unsafe fn new_unchecked() -> Self {
    Self { _detected: () }
  }

  #[inline]
  pub(crate) fn fold(self, params: FoldParams<'_>, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: `self` is only constructed after detection.
    unsafe { fold_unchecked(params, crc, data) }
  }

  #[inline]
  pub(crate) fn bytewise(self, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: `self` is only constructed after detection.
    unsafe { bytewise_unchecked(crc, data) }
  }

  #[inline]
  pub(crate) fn wordwise(self, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: `self` is only constructed after detection.
    unsafe { wordwise_unchecked(crc, data) }
  }
}

impl NativeStep for CrcPmull {
  #[inline(always)]
  fn step8(self, crc: u32, byte: u8) -> u32 {
    // SAFETY: `self` proves the CRC extension.
    unsafe { __crc32cb(crc, byte) }
  }

  #[inline(always)]
  fn step64(self, crc: u64, word: u64) -> u64 {
    // SAFETY: `self` proves the CRC extension.
    u64::from(unsafe { __crc32cd(crc as u32, word) })
  }
}

impl CarrylessMultiply for CrcPmull {
  #[inline(always)]
  fn clmul(self, a: u64, b: u64) -> u128 {
    // SAFETY: `self` proves aes (PMULL).
    unsafe { vmull_p64(a, b) }
  }
}

/// Two-lane fold with CRC32CX stepping and PMULL merging.
///
/// # Safety
/// Caller must ensure the CPU supports `crc` and `aes`.
#[target_feature(enable = "crc,aes")]
unsafe fn fold_unchecked(params: FoldParams<'_>, crc: u32, data: &[u8]) -> u32 {
  // SAFETY: forwarded from the caller.
  let k = unsafe { CrcPmull::new_unchecked() };
  fold_kernel(k, params, crc, data)
}

/// # Safety
/// Caller must ensure the CPU supports `crc` and `aes`.
#[target_feature(enable = "crc,aes")]
unsafe fn bytewise_unchecked(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: forwarded from the caller.
  let k = unsafe { CrcPmull::new_unchecked() };
  super::bytewise(k, crc, data)
}

/// # Safety
/// Caller must ensure the CPU supports `crc` and `aes`.
#[target_feature(enable = "crc,aes")]
unsafe fn wordwise_unchecked(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: forwarded from the caller.
  let k = unsafe { CrcPmull::new_unchecked() };
  super::wordwise(k, crc, data)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_crc_pmull_primitives() {
    let Some(k) = CrcPmull::detect() else {
      return;
    };
    crate::native::tests::check_primitives(k);
  }
}
