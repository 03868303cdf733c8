//! One-shot, streaming, resume and combine with CRC-32C.
//!
//! Run with: `cargo run --example basic -p crcfold`

use crcfold::{ChecksumCombine, Crc32c, FoldEngine, compute_crc, selected_backend};

fn main() {
  println!("backend: {}", selected_backend());
  let engine = FoldEngine::new();
  println!("fold geometry: leaf={} max={} blocks\n", engine.leaf_blocks(), engine.max_blocks());

  let data = b"123456789";

  let raw = compute_crc(data, 0);
  println!("raw register:     0x{raw:08X}");
  assert_eq!(raw, 0x58E3_FA20);

  let crc = Crc32c::checksum(data);
  println!("CRC-32C:          0x{crc:08X}");
  assert_eq!(crc, 0xE306_9283);

  let mut hasher = Crc32c::new();
  for chunk in data.chunks(2) {
    hasher.update(chunk);
  }
  println!("streaming:        0x{:08X}", hasher.finalize());
  assert_eq!(hasher.finalize(), crc);

  let (a, b) = data.split_at(4);
  let mut resumed = Crc32c::resume(Crc32c::checksum(a));
  resumed.update(b);
  println!("resumed:          0x{:08X}", resumed.finalize());
  assert_eq!(resumed.finalize(), crc);

  let combined = <Crc32c as ChecksumCombine>::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len());
  println!("combined:         0x{combined:08X}");
  assert_eq!(combined, crc);
}
