//! Every CRC-32C implementation in the crate, behind one enum.
//!
//! All strategies share raw register semantics: `compute(data, previous)`
//! continues from `previous` without inversion and returns identical values.

use core::fmt;

use crate::{
  constants::crc32c::POLYNOMIAL,
  dispatch,
  fold::compute_crc,
  reference::{crc32_bitwise, crc32_bitwise_branchless},
  tabular::crc32c_slice_by,
};

/// A CRC-32C implementation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
  /// Bit-at-a-time LFSR, branching on the low bit.
  BitSerial,
  /// Bit-at-a-time LFSR with a mask instead of a branch.
  BitSerialBranchless,
  /// One 256-entry table, one byte per lookup.
  Tabular1,
  Tabular2,
  Tabular4,
  Tabular8,
  Tabular16,
  /// Native byte step, single lane.
  Native1,
  /// Native 8-byte step, single lane, then byte tail.
  Native8,
  /// Two-lane folding engine.
  Fold,
}

impl Strategy {
  /// Every strategy, slowest first.
  pub const ALL: [Self; 10] = [
    Self::BitSerial,
    Self::BitSerialBranchless,
    Self::Tabular1,
    Self::Tabular2,
    Self::Tabular4,
    Self::Tabular8,
    Self::Tabular16,
    Self::Native1,
    Self::Native8,
    Self::Fold,
  ];

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::BitSerial => "bit-serial",
      Self::BitSerialBranchless => "bit-serial-branchless",
      Self::Tabular1 => "slice-by-1",
      Self::Tabular2 => "slice-by-2",
      Self::Tabular4 => "slice-by-4",
      Self::Tabular8 => "slice-by-8",
      Self::Tabular16 => "slice-by-16",
      Self::Native1 => "native-1",
      Self::Native8 => "native-8",
      Self::Fold => "fold",
    }
  }

  /// Look a strategy up by [`name`](Self::name).
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.name() == name)
  }

  /// CRC-32C register after `data`, continuing from `previous`.
  #[must_use]
  pub fn compute(self, data: &[u8], previous: u32) -> u32 {
    match self {
      Self::BitSerial => crc32_bitwise(POLYNOMIAL, previous, data),
      Self::BitSerialBranchless => crc32_bitwise_branchless(POLYNOMIAL, previous, data),
      Self::Tabular1 => crc32c_slice_by::<1>(previous, data),
      Self::Tabular2 => crc32c_slice_by::<2>(previous, data),
      Self::Tabular4 => crc32c_slice_by::<4>(previous, data),
      Self::Tabular8 => crc32c_slice_by::<8>(previous, data),
      Self::Tabular16 => crc32c_slice_by::<16>(previous, data),
      Self::Native1 => dispatch::selected().bytewise(previous, data),
      Self::Native8 => dispatch::selected().wordwise(previous, data),
      Self::Fold => compute_crc(data, previous),
    }
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
