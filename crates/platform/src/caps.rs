//! CPU capability representation.
//!
//! This module answers one question: "Which CRC-relevant instructions can I
//! legally run on this machine?"
//!
//! # Design
//!
//! [`Caps`] is a 64-bit bitset. Each bit corresponds to one ISA extension that
//! a crcfold kernel may use. The bits are architecture-specific but the API is
//! uniform across all targets.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: aarch64 features
//!
//! # Usage
//!
//! ```
//! use platform::caps::x86;
//!
//! let c = platform::caps();
//! if c.has(x86::FOLD_READY) {
//!   // SSE4.2 crc32 + PCLMULQDQ are both available
//! }
//! ```

use core::fmt;

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Features in `self` that are not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Create a capability set with a single bit set.
  ///
  /// Bits above 63 are masked into range.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Iterate over the names of every feature present in this set.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}

const FEATURE_NAMES: [(Caps, &str); 4] = [
  (x86::SSE42, "sse4.2"),
  (x86::PCLMULQDQ, "pclmulqdq"),
  (aarch64::CRC, "crc"),
  (aarch64::AES, "aes"),
];

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

/// x86/x86_64 CPU features (bits 0-31).
pub mod x86 {
  use super::Caps;

  /// SSE4.2: provides the `crc32` instruction (CRC-32C polynomial only).
  pub const SSE42: Caps = Caps::bit(0);
  /// PCLMULQDQ: 64x64 -> 128-bit carryless multiply.
  pub const PCLMULQDQ: Caps = Caps::bit(1);

  /// Everything the two-lane fold kernel needs.
  pub const FOLD_READY: Caps = Caps(SSE42.0 | PCLMULQDQ.0);
}

/// aarch64 CPU features (bits 32-63).
pub mod aarch64 {
  use super::Caps;

  /// CRC extension: `crc32c{b,h,w,x}` instructions.
  pub const CRC: Caps = Caps::bit(32);
  /// AES extension; carries the 64x64 -> 128-bit `PMULL` polynomial multiply.
  pub const AES: Caps = Caps::bit(33);

  /// Everything the two-lane fold kernel needs.
  pub const FOLD_READY: Caps = Caps(CRC.0 | AES.0);
}
