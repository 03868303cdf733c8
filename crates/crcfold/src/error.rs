//! Error types.

use core::fmt;

/// Rejected [`FoldEngine`](crate::FoldEngine) parameters.
///
/// Every check happens once, at construction; `compute` itself is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FoldError {
  /// `leaf_blocks` was zero.
  ZeroLeaf,
  /// `leaf_blocks` exceeds `max_blocks`.
  LeafExceedsMax {
    /// Requested leaf size in 16-byte blocks.
    leaf_blocks: usize,
    /// Requested maximum block count.
    max_blocks: usize,
  },
  /// The table has no multiplier for `max_blocks`.
  TableTooSmall {
    /// Block counts the table can serve.
    capacity: usize,
    /// Requested maximum block count.
    required: usize,
  },
}

impl fmt::Display for FoldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ZeroLeaf => f.write_str("leaf size must be at least one 16-byte block"),
      Self::LeafExceedsMax {
        leaf_blocks,
        max_blocks,
      } => write!(f, "leaf of {leaf_blocks} blocks exceeds the maximum of {max_blocks} blocks"),
      Self::TableTooSmall { capacity, required } => {
        write!(f, "constant table serves {capacity} blocks but {required} are required")
      }
    }
  }
}

impl core::error::Error for FoldError {}
