//! Backend selection.
//!
//! A [`Backend`] bundles one implementation of the native primitives. Hardware
//! backends are only constructible after detection, so holding one is proof
//! that its instructions are legal on this CPU.

use core::fmt;

#[cfg(target_arch = "aarch64")]
use crate::native::aarch64::CrcPmull;
#[cfg(target_arch = "x86_64")]
use crate::native::x86_64::Sse42Pclmul;
use crate::{
  config::{self, Force},
  fold::FoldParams,
  native::{self, CarrylessMultiply, NativeStep, Portable},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
  Portable(Portable),
  #[cfg(target_arch = "x86_64")]
  Sse42Pclmul(Sse42Pclmul),
  #[cfg(target_arch = "aarch64")]
  CrcPmull(CrcPmull),
}

/// Native primitive implementation (opaque).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Backend {
  kind: Kind,
}

impl Backend {
  /// Table-driven primitives; always available.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      kind: Kind::Portable(Portable),
    }
  }

  /// The hardware backend, if this CPU supports both a CRC-32C step
  /// instruction and a 64-bit carryless multiply.
  #[must_use]
  pub fn hardware() -> Option<Self> {
    #[cfg(target_arch = "x86_64")]
    if let Some(k) = Sse42Pclmul::detect() {
      return Some(Self {
        kind: Kind::Sse42Pclmul(k),
      });
    }

    #[cfg(target_arch = "aarch64")]
    if let Some(k) = CrcPmull::detect() {
      return Some(Self {
        kind: Kind::CrcPmull(k),
      });
    }

    None
  }

  /// Pick a backend honoring `CRCFOLD_FORCE`, without caching.
  #[must_use]
  pub fn detect() -> Self {
    match config::get().effective_force {
      Force::Portable => Self::portable(),
      Force::Auto | Force::Hardware => Self::hardware().unwrap_or_else(Self::portable),
    }
  }

  /// Diagnostic name, e.g. `x86_64/sse4.2+pclmulqdq`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self.kind {
      Kind::Portable(_) => "portable/table",
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(_) => "x86_64/sse4.2+pclmulqdq",
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(_) => "aarch64/crc+pmull",
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_hardware(self) -> bool {
    !matches!(self.kind, Kind::Portable(_))
  }

  /// Advance `crc` over one byte.
  #[inline]
  #[must_use]
  pub fn step8(self, crc: u32, byte: u8) -> u32 {
    match self.kind {
      Kind::Portable(k) => k.step8(crc, byte),
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(k) => k.step8(crc, byte),
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(k) => k.step8(crc, byte),
    }
  }

  /// Advance `crc` (low 32 bits) over one little-endian 64-bit word.
  #[inline]
  #[must_use]
  pub fn step64(self, crc: u64, word: u64) -> u64 {
    match self.kind {
      Kind::Portable(k) => k.step64(crc, word),
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(k) => k.step64(crc, word),
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(k) => k.step64(crc, word),
    }
  }

  /// 64x64 -> 128-bit carryless product.
  #[inline]
  #[must_use]
  pub fn clmul(self, a: u64, b: u64) -> u128 {
    match self.kind {
      Kind::Portable(k) => k.clmul(a, b),
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(k) => k.clmul(a, b),
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(k) => k.clmul(a, b),
    }
  }

  #[inline]
  pub(crate) fn fold(self, params: FoldParams<'_>, crc: u32, data: &[u8]) -> u32 {
    match self.kind {
      Kind::Portable(k) => crate::fold::fold_kernel(k, params, crc, data),
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(k) => k.fold(params, crc, data),
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(k) => k.fold(params, crc, data),
    }
  }

  /// Single lane, one byte step at a time.
  #[inline]
  pub(crate) fn bytewise(self, crc: u32, data: &[u8]) -> u32 {
    match self.kind {
      Kind::Portable(k) => native::bytewise(k, crc, data),
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(k) => k.bytewise(crc, data),
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(k) => k.bytewise(crc, data),
    }
  }

  /// Single lane, one word step at a time.
  #[inline]
  pub(crate) fn wordwise(self, crc: u32, data: &[u8]) -> u32 {
    match self.kind {
      Kind::Portable(k) => native::wordwise(k, crc, data),
      #[cfg(target_arch = "x86_64")]
      Kind::Sse42Pclmul(k) => k.wordwise(crc, data),
      #[cfg(target_arch = "aarch64")]
      Kind::CrcPmull(k) => k.wordwise(crc, data),
    }
  }
}

impl fmt::Debug for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Backend").field(&self.name()).finish()
  }
}

impl Default for Backend {
  fn default() -> Self {
    selected()
  }
}

fn select() -> Backend {
  let backend = Backend::detect();

  #[cfg(feature = "tracing")]
  {
    let cfg = config::get();
    tracing::debug!(
      backend = backend.name(),
      requested_force = cfg.requested_force.as_str(),
      effective_force = cfg.effective_force.as_str(),
      leaf_blocks = cfg.leaf_blocks,
      max_blocks = cfg.max_blocks,
      "selected crc32c backend"
    );
  }

  backend
}

/// The process-wide backend, selected on first use.
#[inline]
#[must_use]
pub fn selected() -> Backend {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static SELECTED: OnceLock<Backend> = OnceLock::new();
    *SELECTED.get_or_init(select)
  }

  #[cfg(not(feature = "std"))]
  {
    select()
  }
}

/// Name of the process-wide backend.
///
/// This is intended for diagnostics and benchmarking.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  selected().name()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_portable_is_not_hardware() {
    let p = Backend::portable();
    assert!(!p.is_hardware());
    assert_eq!(p.name(), "portable/table");
  }

  #[test]
  fn test_hardware_matches_caps() {
    match Backend::hardware() {
      Some(b) => {
        assert!(b.is_hardware());
        assert_ne!(b.name(), "portable/table");
      }
      None => {
        #[cfg(target_arch = "x86_64")]
        assert!(!platform::caps().has(platform::caps::x86::FOLD_READY));
        #[cfg(target_arch = "aarch64")]
        assert!(!platform::caps().has(platform::caps::aarch64::FOLD_READY));
      }
    }
  }

  #[test]
  fn test_selected_is_stable() {
    let first = selected();
    assert_eq!(selected(), first);
    assert_eq!(selected_backend(), first.name());
  }

  #[test]
  fn test_primitives_agree_across_backends() {
    let portable = Backend::portable();
    let candidates = [Some(portable), Backend::hardware()];
    for backend in candidates.into_iter().flatten() {
      assert_eq!(backend.step8(0, 0xFF), 0xAD7D_5351, "{backend:?}");
      assert_eq!(
        backend.step64(0x1234_5678, 0x0102_0304_0506_0708),
        portable.step64(0x1234_5678, 0x0102_0304_0506_0708),
        "{backend:?}"
      );
      assert_eq!(backend.clmul(0xFFFF_FFFF, 0x493C_7D27), portable.clmul(0xFFFF_FFFF, 0x493C_7D27));
    }
  }

  #[test]
  fn test_debug_shows_name() {
    extern crate alloc;
    let text = alloc::format!("{:?}", Backend::portable());
    assert_eq!(text, "Backend(\"portable/table\")");
  }
}
