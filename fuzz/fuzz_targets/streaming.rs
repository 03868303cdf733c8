//! Arbitrary sequences of update calls produce the one-shot result.

#![no_main]

use arbitrary::Arbitrary;
use crcfold::{Crc32c, Crc32cRaw, parallel::combine_checksums};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<u16>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let mut std = Crc32c::new();
  let mut raw = Crc32cRaw::new();
  let mut parts = Vec::new();

  let mut offset = 0;
  let mut idx = 0;
  while offset < data.len() {
    let size = match input.chunk_sizes.get(idx % input.chunk_sizes.len().max(1)) {
      Some(&s) => usize::from(s % 4096).max(1),
      None => 1,
    };
    let end = (offset + size).min(data.len());
    let chunk = &data[offset..end];
    std.update(chunk);
    raw.update(chunk);
    parts.push((Crc32c::checksum(chunk), chunk.len()));
    offset = end;
    idx += 1;
  }

  let expected = Crc32c::checksum(data);
  assert_eq!(std.finalize(), expected, "crc32c streaming mismatch");
  assert_eq!(raw.finalize(), crcfold::compute_crc(data, 0), "raw streaming mismatch");
  if let Some(combined) = combine_checksums::<Crc32c>(&parts) {
    assert_eq!(combined, expected, "combine mismatch");
  }
});
