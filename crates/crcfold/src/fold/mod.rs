//! Two-lane CRC-32C folding.
//!
//! - [`ConstantTable`]: fold multipliers, one per block count.
//! - [`FoldEngine`]: validated geometry + table + backend.
//! - [`compute_crc`]: the process-wide default engine.

mod engine;
mod kernel;
mod table;

pub use engine::{FoldEngine, compute_crc};
pub(crate) use kernel::{FoldParams, fold_kernel};
#[cfg(feature = "alloc")]
pub use table::build_constant_table;
pub use table::{ConstantTable, DEFAULT_LEAF_BLOCKS, DEFAULT_MAX_BLOCKS, multiplier_entries};
