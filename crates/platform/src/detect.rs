//! Runtime CPU detection.
//!
//! [`caps`] returns the detected CPU capabilities. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via CPUID on x86, auxv/sysctl on ARM) with `std`
//! - Caching (one atomic word, works with and without `std`)
//! - A one-shot override for bare metal and testing
//! - Miri fallback (always returns portable caps)
//!
//! # Overrides
//!
//! ```
//! // Must run before anything calls `platform::caps()`.
//! let _ = platform::try_set_override(platform::Caps::NONE);
//! ```

use core::{
  fmt,
  sync::atomic::{AtomicU64, Ordering},
};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────
//
// Bit 63 is never a feature bit; it marks the cache as initialized so that an
// empty capability set is still distinguishable from "not detected yet".

const INITIALIZED: u64 = 1 << 63;

static CACHE: AtomicU64 = AtomicU64::new(0);

/// Error returned by [`try_set_override`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideError {
  /// Capabilities were already detected (or overridden) for this process.
  AlreadyInitialized,
  /// The override names features this CPU does not have.
  Unsupported {
    /// Features requested but not detected.
    missing: Caps,
  },
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AlreadyInitialized => f.write_str("CPU capabilities were already initialized"),
      Self::Unsupported { missing } => write!(f, "override requests unsupported CPU features {missing:?}"),
    }
  }
}

impl core::error::Error for OverrideError {}

/// Get the CPU capabilities for this process.
///
/// The first call detects (or adopts an override) and caches the result; every
/// later call is a single atomic load.
///
/// # Miri
///
/// Under Miri, always returns [`Caps::NONE`] to avoid interpreting intrinsics.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    let word = CACHE.load(Ordering::Acquire);
    if word & INITIALIZED != 0 {
      return Caps(word & !INITIALIZED);
    }
    init_slow()
  }
}

#[cold]
#[cfg(not(miri))]
fn init_slow() -> Caps {
  let detected = detect_uncached();
  match CACHE.compare_exchange(0, detected.0 | INITIALIZED, Ordering::AcqRel, Ordering::Acquire) {
    Ok(_) => detected,
    // Lost the race to another detector or to an override.
    Err(word) => Caps(word & !INITIALIZED),
  }
}

/// Restrict the process-wide capabilities before first use.
///
/// The override must be a subset of what this CPU actually supports, so it can
/// only ever narrow dispatch (for example to force the portable path).
///
/// # Errors
///
/// - [`OverrideError::Unsupported`] if `caps` names undetected features.
/// - [`OverrideError::AlreadyInitialized`] if [`caps`] already ran.
pub fn try_set_override(caps: Caps) -> Result<(), OverrideError> {
  let missing = caps.difference(detect_uncached());
  if !missing.is_empty() {
    return Err(OverrideError::Unsupported { missing });
  }
  CACHE
    .compare_exchange(0, caps.0 | INITIALIZED, Ordering::AcqRel, Ordering::Acquire)
    .map(|_| ())
    .map_err(|_| OverrideError::AlreadyInitialized)
}

/// Restrict the process-wide capabilities before first use.
///
/// # Panics
///
/// Panics if [`try_set_override`] would return an error.
#[allow(clippy::panic)]
pub fn set_override(caps: Caps) {
  if let Err(e) = try_set_override(caps) {
    panic!("platform::set_override: {e}");
  }
}

/// Check whether capabilities have been resolved for this process.
#[inline]
#[must_use]
pub fn is_initialized() -> bool {
  CACHE.load(Ordering::Acquire) & INITIALIZED != 0
}

/// Detect capabilities without consulting or filling the cache.
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(all(not(miri), target_arch = "x86_64"))]
  {
    detect_x86_64()
  }

  #[cfg(all(not(miri), target_arch = "aarch64"))]
  {
    detect_aarch64()
  }

  #[cfg(all(not(miri), not(any(target_arch = "x86_64", target_arch = "aarch64"))))]
  {
    Caps::NONE
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(miri), target_arch = "x86_64"))]
fn detect_x86_64() -> Caps {
  use crate::caps::x86;

  let mut out = Caps::NONE;

  if cfg!(target_feature = "sse4.2") {
    out |= x86::SSE42;
  }
  if cfg!(target_feature = "pclmulqdq") {
    out |= x86::PCLMULQDQ;
  }

  #[cfg(feature = "std")]
  {
    if std::arch::is_x86_feature_detected!("sse4.2") {
      out |= x86::SSE42;
    }
    if std::arch::is_x86_feature_detected!("pclmulqdq") {
      out |= x86::PCLMULQDQ;
    }
  }

  out
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(miri), target_arch = "aarch64"))]
fn detect_aarch64() -> Caps {
  use crate::caps::aarch64;

  let mut out = Caps::NONE;

  if cfg!(target_feature = "crc") {
    out |= aarch64::CRC;
  }
  if cfg!(target_feature = "aes") {
    out |= aarch64::AES;
  }

  #[cfg(feature = "std")]
  {
    if std::arch::is_aarch64_feature_detected!("crc") {
      out |= aarch64::CRC;
    }
    if std::arch::is_aarch64_feature_detected!("aes") {
      out |= aarch64::AES;
    }
  }

  out
}
