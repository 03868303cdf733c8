//! Precomputed constants for CRC-32C.
//!
//! Lookup tables are computed at compile time and 64-byte (cache line)
//! aligned using [`Aligned64`] so table rows never straddle cache lines.

pub mod crc32c;
pub mod gf2;
pub mod tables;

/// Wrapper type to force 64-byte (cache line) alignment.
///
/// The inner type `T` is accessible via `.0`.
#[repr(align(64))]
pub struct Aligned64<T>(pub T);
