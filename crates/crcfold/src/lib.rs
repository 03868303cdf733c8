//! CRC-32C (Castagnoli) with a two-lane hardware folding engine.
//!
//! The core is [`FoldEngine`]: each block is split into two adjacent lanes
//! stepped independently with the native CRC instruction, then the leading
//! lane is shifted forward by one carryless multiply against a precomputed
//! [`ConstantTable`] entry and merged into the trailing one.
//!
//! Slower strategies are kept as oracles and comparison points; every entry
//! of [`Strategy`] returns bit-identical results.
//!
//! | Strategy | Module |
//! |----------|--------|
//! | Bit-serial LFSR (any reflected polynomial) | [`reference`] |
//! | Slice-by-1/2/4/8/16 (any reflected polynomial) | [`tabular`] |
//! | Single-lane native byte / word steps | [`native`] |
//! | Two-lane fold | [`fold`] |
//!
//! # Hardware
//!
//! | Arch | Step | Multiply |
//! |------|------|----------|
//! | x86_64 | SSE4.2 `crc32` | PCLMULQDQ |
//! | aarch64 | CRC extension | PMULL |
//! | other | slicing-by-8 | software GF(2) |
//!
//! The backend is selected once per process; see [`config`] for the
//! `CRCFOLD_*` environment overrides.
//!
//! # Example
//!
//! ```rust
//! use crcfold::{Checksum, ChecksumCombine, Crc32c, compute_crc};
//!
//! // Raw register: no inversion, continue from any previous value.
//! assert_eq!(compute_crc(b"123456789", 0), 0x58E3_FA20);
//! let first = compute_crc(b"1234", 0);
//! assert_eq!(compute_crc(b"56789", first), 0x58E3_FA20);
//!
//! // Standard CRC-32C.
//! let crc = Crc32c::checksum(b"123456789");
//! assert_eq!(crc, 0xE306_9283);
//!
//! let mut hasher = Crc32c::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//!
//! let (a, b) = b"123456789".split_at(4);
//! assert_eq!(
//!   <Crc32c as ChecksumCombine>::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len()),
//!   crc
//! );
//! ```
//!
//! # no_std Support
//!
//! Disable the `std` feature for embedded use. Without `std` the backend is
//! chosen from compile-time target features, and the process-wide engine is
//! rebuilt per call instead of cached.
//!
//! ```toml
//! [dependencies]
//! crcfold = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod combine;
pub mod config;
pub mod constants;
mod crc32c;
mod dispatch;
mod error;
pub mod fold;
pub mod native;
pub mod parallel;
pub mod reference;
mod strategy;
pub mod tabular;

pub use crc32c::{Crc32c, Crc32cRaw};
pub use dispatch::{Backend, selected_backend};
pub use error::FoldError;
#[cfg(feature = "alloc")]
pub use fold::build_constant_table;
pub use fold::{ConstantTable, FoldEngine, compute_crc};
pub use strategy::Strategy;
pub use traits::{Checksum, ChecksumCombine};

/// Advance a CRC-32C register over one byte on the selected backend.
///
/// ```
/// assert_eq!(crcfold::step8(0, 0xFF), 0xAD7D_5351);
/// ```
#[inline]
#[must_use]
pub fn step8(crc: u32, byte: u8) -> u32 {
  dispatch::selected().step8(crc, byte)
}

/// Advance a CRC-32C register over one little-endian word on the selected
/// backend. Only the low 32 bits of `crc` are read.
#[inline]
#[must_use]
pub fn step64(crc: u64, word: u64) -> u64 {
  dispatch::selected().step64(crc, word)
}

/// 64x64 -> 128-bit carryless multiply on the selected backend.
///
/// ```
/// assert_eq!(crcfold::clmul(0b11, 0b11), 0b101);
/// ```
#[inline]
#[must_use]
pub fn clmul(a: u64, b: u64) -> u128 {
  dispatch::selected().clmul(a, b)
}
