//! CPU capability detection for crcfold.
//!
//! This crate is the **single source of truth** for "which CRC instructions
//! may run here" across the crcfold workspace.
//!
//! # Main Entry Point
//!
//! ```
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::FOLD_READY) {
//!   // SSE4.2 crc32 and PCLMULQDQ are both usable
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: kernels query `platform::caps()` instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: compile-time features are detected via `cfg!`.
//! 3. **Cached otherwise**: runtime detection happens once per process.
//! 4. **Narrowable**: [`try_set_override`] can restrict dispatch before first use.
//! 5. **Miri-safe**: under Miri, always returns portable-only caps.

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::{OverrideError, caps, detect_uncached, is_initialized, set_override, try_set_override};

/// Short description of the running target, e.g. `x86_64 [sse4.2, pclmulqdq]`.
#[cfg(feature = "std")]
#[must_use]
pub fn describe() -> std::string::String {
  use std::{string::String, vec::Vec};

  let names: Vec<&str> = caps().names().collect();
  let mut out = String::from(Arch::current().as_str());
  out.push_str(" [");
  out.push_str(&names.join(", "));
  out.push(']');
  out
}
