//! The folding engine: a validated table + geometry + backend.

use super::{FoldParams, table::ConstantTable};
use crate::{config, dispatch::Backend, error::FoldError};

/// Two-lane CRC-32C folding engine (raw register semantics, no inversion).
///
/// ```
/// use crcfold::FoldEngine;
///
/// let engine = FoldEngine::new();
/// assert_eq!(engine.compute(b"123456789", 0), 0x58E3_FA20);
///
/// // Continuing from a previous register value.
/// let first = engine.compute(b"1234", 0);
/// assert_eq!(engine.compute(b"56789", first), 0x58E3_FA20);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FoldEngine<'t> {
  table: &'t ConstantTable,
  leaf_blocks: usize,
  max_blocks: usize,
  backend: Backend,
}

impl FoldEngine<'static> {
  /// The shared table, configured geometry and process-wide backend.
  #[must_use]
  pub fn new() -> Self {
    let cfg = config::get();
    Self {
      table: ConstantTable::shared(),
      leaf_blocks: cfg.leaf_blocks,
      max_blocks: cfg.max_blocks,
      backend: crate::dispatch::selected(),
    }
  }
}

impl Default for FoldEngine<'static> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'t> FoldEngine<'t> {
  /// An engine over an injected table.
  ///
  /// Blocks span `leaf_blocks..=max_blocks` 16-byte units; shorter input runs
  /// through sequential word and byte steps.
  ///
  /// # Errors
  ///
  /// - [`FoldError::ZeroLeaf`] if `leaf_blocks == 0`
  /// - [`FoldError::LeafExceedsMax`] if `leaf_blocks > max_blocks`
  /// - [`FoldError::TableTooSmall`] if `max_blocks > table.capacity()`
  pub fn with_table(table: &'t ConstantTable, leaf_blocks: usize, max_blocks: usize) -> Result<Self, FoldError> {
    if leaf_blocks == 0 {
      return Err(FoldError::ZeroLeaf);
    }
    if leaf_blocks > max_blocks {
      return Err(FoldError::LeafExceedsMax {
        leaf_blocks,
        max_blocks,
      });
    }
    if max_blocks > table.capacity() {
      return Err(FoldError::TableTooSmall {
        capacity: table.capacity(),
        required: max_blocks,
      });
    }

    Ok(Self {
      table,
      leaf_blocks,
      max_blocks,
      backend: crate::dispatch::selected(),
    })
  }

  /// Run on a specific backend instead of the process-wide one.
  #[must_use]
  pub const fn with_backend(mut self, backend: Backend) -> Self {
    self.backend = backend;
    self
  }

  /// CRC-32C register after `data`, starting from `previous`.
  ///
  /// `compute(b, compute(a, p)) == compute(a ++ b, p)`.
  #[inline]
  #[must_use]
  pub fn compute(&self, data: &[u8], previous: u32) -> u32 {
    self.backend.fold(self.params(), previous, data)
  }

  #[inline]
  fn params(&self) -> FoldParams<'t> {
    FoldParams {
      multipliers: self.table.as_slice(),
      leaf_blocks: self.leaf_blocks,
      max_blocks: self.max_blocks,
    }
  }

  #[inline]
  #[must_use]
  pub const fn leaf_blocks(&self) -> usize {
    self.leaf_blocks
  }

  /// Bytes below which no two-lane block is folded.
  #[inline]
  #[must_use]
  pub const fn leaf_bytes(&self) -> usize {
    self.leaf_blocks * 16
  }

  #[inline]
  #[must_use]
  pub const fn max_blocks(&self) -> usize {
    self.max_blocks
  }

  #[inline]
  #[must_use]
  pub const fn table(&self) -> &'t ConstantTable {
    self.table
  }

  #[inline]
  #[must_use]
  pub const fn backend(&self) -> Backend {
    self.backend
  }
}

fn default_engine() -> FoldEngine<'static> {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static ENGINE: OnceLock<FoldEngine<'static>> = OnceLock::new();
    *ENGINE.get_or_init(FoldEngine::new)
  }

  #[cfg(not(feature = "std"))]
  {
    FoldEngine::new()
  }
}

/// CRC-32C register after `data`, continuing from `previous` (no inversion).
///
/// ```
/// assert_eq!(crcfold::compute_crc(b"123456789", 0), 0x58E3_FA20);
/// assert_eq!(crcfold::compute_crc(&[], 0xDEAD_BEEF), 0xDEAD_BEEF);
/// ```
#[inline]
#[must_use]
pub fn compute_crc(data: &[u8], previous: u32) -> u32 {
  default_engine().compute(data, previous)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;
  use crate::{
    constants::crc32c::{CHECK_RAW, POLYNOMIAL},
    fold::{DEFAULT_LEAF_BLOCKS, DEFAULT_MAX_BLOCKS},
    native::tests::gen_bytes,
    reference::crc32_bitwise,
  };

  fn backends() -> Vec<Backend> {
    [Some(Backend::portable()), Backend::hardware()].into_iter().flatten().collect()
  }

  #[test]
  fn test_check_value() {
    assert_eq!(compute_crc(b"123456789", 0), CHECK_RAW);
    for backend in backends() {
      assert_eq!(
        FoldEngine::new().with_backend(backend).compute(b"123456789", 0),
        CHECK_RAW,
        "{backend:?}"
      );
    }
  }

  #[test]
  fn test_length_boundaries() {
    let leaf = DEFAULT_LEAF_BLOCKS * 16;
    let data = gen_bytes(4 * leaf, 42);
    let table = ConstantTable::shared();
    let lens = [0, 1, 7, 8, 15, 16, leaf - 1, leaf, leaf + 1, 2 * leaf];
    for backend in backends() {
      let engine = FoldEngine::with_table(table, DEFAULT_LEAF_BLOCKS, DEFAULT_MAX_BLOCKS)
        .unwrap()
        .with_backend(backend);
      for len in lens {
        let want = crc32_bitwise(POLYNOMIAL, 0, &data[..len]);
        assert_eq!(engine.compute(&data[..len], 0), want, "{backend:?} len={len}");
      }
    }
  }

  #[test]
  fn test_megabyte_of_zeros() {
    let zeros = alloc::vec![0u8; 1 << 20];
    assert_eq!(crc32_bitwise(POLYNOMIAL, 0, &zeros), 0);
    for backend in backends() {
      assert_eq!(FoldEngine::new().with_backend(backend).compute(&zeros, 0), 0, "{backend:?}");
    }
  }

  #[test]
  fn test_single_ff_is_one_step() {
    for backend in backends() {
      let engine = FoldEngine::new().with_backend(backend);
      assert_eq!(engine.compute(&[0xFF], 0), backend.step8(0, 0xFF));
      assert_eq!(engine.compute(&[0xFF], 0), 0xAD7D_5351);
    }
  }

  #[test]
  fn test_seed_composability() {
    let data = gen_bytes(6000, 99);
    let engine = FoldEngine::new();
    for split in [0usize, 1, 111, 112, 2048, 3001, 6000] {
      let (a, b) = data.split_at(split);
      assert_eq!(
        engine.compute(b, engine.compute(a, 0)),
        engine.compute(&data, 0),
        "split={split}"
      );
    }
  }

  #[cfg(feature = "alloc")]
  #[test]
  fn test_custom_table_geometry() {
    let table = ConstantTable::build(16);
    for (leaf, max) in [(1, 1), (1, 32), (4, 9), (32, 32)] {
      let engine = FoldEngine::with_table(&table, leaf, max).unwrap();
      assert_eq!(engine.leaf_bytes(), leaf * 16);
      let data = gen_bytes(1500, leaf as u64 * 1000 + max as u64);
      for backend in backends() {
        let engine = engine.with_backend(backend);
        assert_eq!(
          engine.compute(&data, 7),
          crc32_bitwise(POLYNOMIAL, 7, &data),
          "{backend:?} leaf={leaf} max={max}"
        );
      }
    }
  }

  #[cfg(feature = "alloc")]
  #[test]
  fn test_construction_errors() {
    let table = ConstantTable::build(4);
    assert_eq!(FoldEngine::with_table(&table, 0, 4).unwrap_err(), FoldError::ZeroLeaf);
    assert_eq!(
      FoldEngine::with_table(&table, 5, 4).unwrap_err(),
      FoldError::LeafExceedsMax {
        leaf_blocks: 5,
        max_blocks: 4
      }
    );
    assert_eq!(
      FoldEngine::with_table(&table, 1, 9).unwrap_err(),
      FoldError::TableTooSmall {
        capacity: 8,
        required: 9
      }
    );
    assert!(FoldEngine::with_table(&table, 1, 8).is_ok());
  }

  #[test]
  fn test_default_engine_geometry() {
    let engine = FoldEngine::new();
    assert!(engine.leaf_blocks() >= 1);
    assert!(engine.leaf_blocks() <= engine.max_blocks());
    assert!(engine.max_blocks() <= engine.table().capacity());
  }
}
