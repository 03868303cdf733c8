//! x86_64 native primitives: SSE4.2 `crc32` + PCLMULQDQ.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::x86_64::{
  _mm_clmulepi64_si128, _mm_crc32_u8, _mm_crc32_u64, _mm_cvtsi64_si128, _mm_cvtsi128_si64, _mm_unpackhi_epi64,
};

use platform::caps::x86;

use super::{CarrylessMultiply, NativeStep};
use crate::fold::{FoldParams, fold_kernel};

/// Proof that SSE4.2 and PCLMULQDQ are usable on this CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sse42Pclmul {
  _detected: (),
}

impl Sse42Pclmul {
  /// The token, if the running CPU has both features.
  #[must_use]
  pub(crate) fn detect() -> Option<Self> {
    platform::caps().has(x86::FOLD_READY).then_some(Self { _detected: () })
  }

  /// # Safety
  /// Caller must ensure the CPU supports `sse4.2` and `pclmulqdq`.
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

impl NativeStep for Sse42Pclmul {
  #[inline(always)]
  fn step8(self, crc: u32, byte: u8) -> u32 {
    // SAFETY: `self` proves sse4.2.
    unsafe { _mm_crc32_u8(crc, byte) }
  }

  #[inline(always)]
  fn step64(self, crc: u64, word: u64) -> u64 {
    // SAFETY: `self` proves sse4.2. The instruction reads only the low 32
    // bits of `crc` and zero-extends its result.
    unsafe { _mm_crc32_u64(crc, word) }
  }
}

impl CarrylessMultiply for Sse42Pclmul {
  #[inline(always)]
  fn clmul(self, a: u64, b: u64) -> u128 {
    // SAFETY: `self` proves pclmulqdq; the remaining intrinsics are SSE2,
    // which is baseline on x86_64.
    unsafe {
      let product = _mm_clmulepi64_si128(_mm_cvtsi64_si128(a as i64), _mm_cvtsi64_si128(b as i64), 0x00);
      let lo = _mm_cvtsi128_si64(product) as u64;
      let hi = _mm_cvtsi128_si64(_mm_unpackhi_epi64(product, product)) as u64;
      (u128::from(hi) << 64) | u128::from(lo)
    }
  }
}

/// Two-lane fold with SSE4.2 stepping and PCLMULQDQ merging.
///
/// # Safety
/// Caller must ensure the CPU supports `sse4.2` and `pclmulqdq`.
#[target_feature(enable = "sse4.2,pclmulqdq")]
unsafe fn fold_unchecked(params: FoldParams<'_>, crc: u32, data: &[u8]) -> u32 {
  // SAFETY: forwarded from the caller.
  let k = unsafe { Sse42Pclmul::new_unchecked() };
  fold_kernel(k, params, crc, data)
}

/// # Safety
/// Caller must ensure the CPU supports `sse4.2` and `pclmulqdq`.
#[target_feature(enable = "sse4.2,pclmulqdq")]
unsafe fn bytewise_unchecked(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: forwarded from the caller.
  let k = unsafe { Sse42Pclmul::new_unchecked() };
  super::bytewise(k, crc, data)
}

/// # Safety
/// Caller must ensure the CPU supports `sse4.2` and `pclmulqdq`.
#[target_feature(enable = "sse4.2,pclmulqdq")]
unsafe fn wordwise_unchecked(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: forwarded from the caller.
  let k = unsafe { Sse42Pclmul::new_unchecked() };
  super::wordwise(k, crc, data)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sse42_pclmul_primitives() {
    let Some(k) = Sse42Pclmul::detect() else {
      return;
    };
    crate::native::tests::check_primitives(k);
  }

  #[test]
  fn test_clmul_known_product() {
    let Some(k) = Sse42Pclmul::detect() else {
      return;
    };
    assert_eq!(k.clmul(u64::MAX, 2), u128::from(u64::MAX) << 1);
    assert_eq!(k.clmul(1 << 63, 1 << 63), 1u128 << 126);
  }
}
