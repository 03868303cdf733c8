//! Fold engine vs the bit-serial reference, over arbitrary geometry,
//! backend, seed and start offset.

#![no_main]

use arbitrary::Arbitrary;
use crcfold::{
  Backend, ConstantTable, FoldEngine, Strategy, constants::crc32c::POLYNOMIAL, reference::crc32_bitwise,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  previous: u32,
  leaf_blocks: u8,
  max_blocks: u8,
  offset: u8,
  hardware: bool,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let offset = usize::from(input.offset % 8).min(input.data.len());
  let data = &input.data[offset..];
  let want = crc32_bitwise(POLYNOMIAL, input.previous, data);

  let backend = if input.hardware {
    Backend::hardware().unwrap_or_else(Backend::portable)
  } else {
    Backend::portable()
  };

  let table = ConstantTable::shared();
  let leaf = usize::from(input.leaf_blocks).max(1);
  let max = usize::from(input.max_blocks).max(leaf);
  match FoldEngine::with_table(table, leaf, max) {
    Ok(engine) => {
      let got = engine.with_backend(backend).compute(data, input.previous);
      assert_eq!(got, want, "fold mismatch leaf={leaf} max={max} backend={backend:?}");
    }
    Err(_) => assert!(max > table.capacity()),
  }

  for s in Strategy::ALL {
    assert_eq!(s.compute(data, input.previous), want, "{s} mismatch");
  }
});
