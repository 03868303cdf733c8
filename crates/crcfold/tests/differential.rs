//! Differential tests against independent CRC-32C crates.

use crc::{CRC_32_ISCSI, Crc};
use crc_fast::CrcAlgorithm;
use crcfold::{Crc32c, Strategy as CrcStrategy};
use proptest::prelude::*;

const ISCSI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

fn crc_fast_iscsi(data: &[u8]) -> u32 {
  crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, data) as u32
}

fn standard(strategy: CrcStrategy, data: &[u8]) -> u32 {
  strategy.compute(data, !0) ^ !0
}

#[test]
fn check_value_matches_crates() {
  assert_eq!(crc32c::crc32c(b"123456789"), 0xE306_9283);
  assert_eq!(ISCSI.checksum(b"123456789"), 0xE306_9283);
  assert_eq!(crc_fast_iscsi(b"123456789"), 0xE306_9283);
  assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
}

#[test]
fn large_buffers_match_crates() {
  let data: Vec<u8> = (0..(3 << 20)).map(|i: u32| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();
  for len in [0usize, 1, 4095, 1 << 20, (3 << 20) - 1] {
    let slice = &data[..len];
    let ours = Crc32c::checksum(slice);
    assert_eq!(ours, crc32c::crc32c(slice), "crc32c len={len}");
    assert_eq!(ours, ISCSI.checksum(slice), "crc len={len}");
    assert_eq!(ours, crc_fast_iscsi(slice), "crc-fast len={len}");
  }
}

#[test]
fn append_matches_crc32c_crate() {
  let (a, b) = b"The quick brown fox jumps over the lazy dog".split_at(17);
  let mut h = Crc32c::resume(crc32c::crc32c(a));
  h.update(b);
  assert_eq!(h.finalize(), crc32c::crc32c_append(crc32c::crc32c(a), b));
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(500))]

  #[test]
  fn every_strategy_matches_crates(data in prop::collection::vec(any::<u8>(), 0..6000)) {
    let want = crc32c::crc32c(&data);
    prop_assert_eq!(ISCSI.checksum(&data), want);
    prop_assert_eq!(crc_fast_iscsi(&data), want);
    prop_assert_eq!(Crc32c::checksum(&data), want);
    for s in CrcStrategy::ALL {
      prop_assert_eq!(standard(s, &data), want, "{}", s);
    }
  }

  #[test]
  fn streaming_matches_crc_digest(data in prop::collection::vec(any::<u8>(), 0..6000), chunk in 1..700usize) {
    let mut ours = Crc32c::new();
    let mut theirs = ISCSI.digest();
    for part in data.chunks(chunk) {
      ours.update(part);
      theirs.update(part);
    }
    prop_assert_eq!(ours.finalize(), theirs.finalize());
  }
}
