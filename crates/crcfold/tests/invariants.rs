//! Deterministic invariants: oracle equivalence, length boundaries, alignment
//! and known values, across every strategy and every available backend.

#![cfg(feature = "alloc")]

use crcfold::{
  Backend, ConstantTable, FoldEngine, Strategy, build_constant_table, compute_crc,
  constants::crc32c::{CHECK_RAW, POLYNOMIAL},
  fold::{DEFAULT_LEAF_BLOCKS, DEFAULT_MAX_BLOCKS},
  reference::crc32_bitwise,
};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed | 1;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

fn oracle(data: &[u8], previous: u32) -> u32 {
  crc32_bitwise(POLYNOMIAL, previous, data)
}

fn backends() -> Vec<Backend> {
  [Some(Backend::portable()), Backend::hardware()].into_iter().flatten().collect()
}

#[test]
fn every_strategy_matches_oracle() {
  let data = gen_bytes(5000, 0xC0FFEE);
  for len in (0..=300).chain([1023, 1024, 1025, 2047, 2048, 2049, 4095, 4096, 4097, 5000]) {
    let want = oracle(&data[..len], 0);
    for s in Strategy::ALL {
      assert_eq!(s.compute(&data[..len], 0), want, "{s} len={len}");
    }
  }
}

#[test]
fn length_boundaries_every_backend() {
  let leaf = DEFAULT_LEAF_BLOCKS * 16;
  let data = gen_bytes(4 * leaf + 64, 11);
  let lens = [0, 1, 7, 8, 15, 16, leaf - 1, leaf, leaf + 1, 2 * leaf];
  for backend in backends() {
    let engine = FoldEngine::with_table(ConstantTable::shared(), DEFAULT_LEAF_BLOCKS, DEFAULT_MAX_BLOCKS)
      .unwrap()
      .with_backend(backend);
    for len in lens {
      for previous in [0u32, !0, 0x1234_5678] {
        assert_eq!(
          engine.compute(&data[..len], previous),
          oracle(&data[..len], previous),
          "{backend:?} len={len} previous={previous:#x}"
        );
      }
    }
  }
}

#[test]
fn block_sizes_around_max() {
  let max = DEFAULT_MAX_BLOCKS * 16;
  let data = gen_bytes(3 * max + 100, 23);
  for len in [max - 16, max - 1, max, max + 1, max + 8, max + 111, max + 112, 2 * max, 3 * max + 100] {
    assert_eq!(compute_crc(&data[..len], 0), oracle(&data[..len], 0), "len={len}");
  }
}

#[test]
fn alignment_invariance() {
  let content = gen_bytes(3000, 99);
  let mut backing = vec![0u8; content.len() + 16];
  let want = oracle(&content, 0);
  for offset in 0..16 {
    backing[offset..offset + content.len()].copy_from_slice(&content);
    let view = &backing[offset..offset + content.len()];
    for backend in backends() {
      let engine = FoldEngine::new().with_backend(backend);
      assert_eq!(engine.compute(view, 0), want, "{backend:?} offset={offset}");
    }
  }
}

#[test]
fn known_values() {
  assert_eq!(compute_crc(b"123456789", 0), CHECK_RAW);
  assert_eq!(compute_crc(&[0xFF], 0), 0xAD7D_5351);
  assert_eq!(compute_crc(&[0u8; 32], 0), 0);
  assert_eq!(compute_crc(&[0xFFu8; 32], 0), 0xE839_9DE9);
  assert_eq!(compute_crc(&vec![0u8; 1 << 20], 0), 0);
  assert_eq!(compute_crc(&[], 0xABCD_EF01), 0xABCD_EF01);
}

#[test]
fn every_geometry_matches_oracle() {
  let table = build_constant_table(32);
  let data = gen_bytes(2500, 5);
  for leaf in [1usize, 2, 7, 32] {
    for max in [leaf, 16, 32] {
      if max < leaf {
        continue;
      }
      let engine = FoldEngine::with_table(&table, leaf, max).unwrap();
      for len in [0usize, 15, 16, 17, 100, 511, 512, 513, 2500] {
        assert_eq!(
          engine.compute(&data[..len], 3),
          oracle(&data[..len], 3),
          "leaf={leaf} max={max} len={len}"
        );
      }
    }
  }
}

#[test]
fn table_determinism() {
  assert_eq!(build_constant_table(64), build_constant_table(64));
  let big = build_constant_table(DEFAULT_MAX_BLOCKS);
  assert_eq!(&big, ConstantTable::shared());
  assert_eq!(build_constant_table(10).as_slice(), &big.as_slice()[..20]);
}
