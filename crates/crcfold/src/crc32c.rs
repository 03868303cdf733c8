//! Streaming CRC-32C hashers on top of the folding engine.
//!
//! | Type | Init | Xorout | `"123456789"` |
//! |------|------|--------|---------------|
//! | [`Crc32cRaw`] | `previous` (default 0) | none | `0x58E3_FA20` |
//! | [`Crc32c`] | `0xFFFF_FFFF` | `0xFFFF_FFFF` | `0xE306_9283` |
//!
//! Both are `Send` and `Sync`, and split work combines through
//! [`ChecksumCombine`].

use traits::{Checksum, ChecksumCombine};

use crate::{combine::crc32c_combine, fold::compute_crc};

// ─────────────────────────────────────────────────────────────────────────────
// Raw register
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32C with raw register semantics: no inversion on the way in or out.
///
/// Matches [`compute_crc`] exactly.
///
/// ```
/// use crcfold::{Checksum, Crc32cRaw, compute_crc};
///
/// let mut h = Crc32cRaw::new();
/// h.update(b"1234");
/// h.update(b"56789");
/// assert_eq!(h.finalize(), compute_crc(b"123456789", 0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Crc32cRaw {
  state: u32,
  initial: u32,
}

impl Crc32cRaw {
  /// A hasher seeded with 0.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { state: 0, initial: 0 }
  }

  /// A hasher seeded with a previous register value.
  #[inline]
  #[must_use]
  pub const fn with_initial(previous: u32) -> Self {
    Self {
      state: previous,
      initial: previous,
    }
  }

  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.state = compute_crc(data, self.state);
  }

  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u32 {
    self.state
  }

  #[inline]
  pub fn reset(&mut self) {
    self.state = self.initial;
  }
}

impl Checksum for Crc32cRaw {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Crc32cRaw::new()
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Crc32cRaw::with_initial(initial)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32cRaw::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    Crc32cRaw::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Crc32cRaw::reset(self);
  }

  #[inline]
  fn checksum(data: &[u8]) -> u32 {
    compute_crc(data, 0)
  }
}

impl ChecksumCombine for Crc32cRaw {
  #[inline]
  fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    crc32c_combine(crc_a, crc_b, len_b)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Standard CRC-32C
// ─────────────────────────────────────────────────────────────────────────────

/// Standard CRC-32C (Castagnoli): init and xorout `0xFFFF_FFFF`.
///
/// ```
/// use crcfold::{Checksum, Crc32c};
///
/// assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
/// ```
#[derive(Clone, Debug)]
pub struct Crc32c {
  /// Inverted register; xorout is applied on finalize.
  state: u32,
  initial: u32,
}

impl Crc32c {
  const INIT: u32 = 0xFFFF_FFFF;

  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      state: Self::INIT,
      initial: Self::INIT,
    }
  }

  /// A hasher that continues after data whose checksum was `crc`.
  ///
  /// ```
  /// use crcfold::{Checksum, Crc32c};
  ///
  /// let (first, second) = b"hello world".split_at(6);
  /// let mut h = Crc32c::resume(Crc32c::checksum(first));
  /// h.update(second);
  /// assert_eq!(h.finalize(), Crc32c::checksum(b"hello world"));
  /// ```
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self {
      state: crc ^ Self::INIT,
      initial: crc ^ Self::INIT,
    }
  }

  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> u32 {
    compute_crc(data, Self::INIT) ^ Self::INIT
  }

  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.state = compute_crc(data, self.state);
  }

  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u32 {
    self.state ^ Self::INIT
  }

  #[inline]
  pub fn reset(&mut self) {
    self.state = self.initial;
  }

  /// `crc(A ++ B)` from `crc(A)`, `crc(B)` and `len(B)`.
  #[inline]
  #[must_use]
  pub fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    crc32c_combine(crc_a, crc_b, len_b)
  }
}

impl Default for Crc32c {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Checksum for Crc32c {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Crc32c::new()
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Crc32c::resume(initial)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32c::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    Crc32c::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Crc32c::reset(self);
  }

  #[inline]
  fn checksum(data: &[u8]) -> u32 {
    Crc32c::checksum(data)
  }
}

impl ChecksumCombine for Crc32c {
  #[inline]
  fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    Crc32c::combine(crc_a, crc_b, len_b)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::io
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
impl std::io::Write for Crc32cRaw {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

#[cfg(feature = "std")]
impl std::io::Write for Crc32c {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    constants::crc32c::{CHECK, CHECK_RAW},
    native::tests::gen_bytes,
  };

  #[test]
  fn test_check_values() {
    assert_eq!(<Crc32cRaw as Checksum>::checksum(b"123456789"), CHECK_RAW);
    assert_eq!(Crc32c::checksum(b"123456789"), CHECK);
  }

  #[test]
  fn test_known_standard_values() {
    assert_eq!(Crc32c::checksum(&[]), 0);
    assert_eq!(Crc32c::checksum(&[0u8]), 0x527D_5351);
    assert_eq!(Crc32c::checksum(&[0u8; 32]), 0x8A91_36AA);
    assert_eq!(Crc32c::checksum(&[0xFFu8; 32]), 0x62A8_AB43);
  }

  #[test]
  fn test_streaming_matches_oneshot() {
    let data = gen_bytes(4099, 77);
    for chunk in [1usize, 7, 64, 113, 2048, 4099] {
      let mut raw = Crc32cRaw::new();
      let mut std = Crc32c::new();
      for part in data.chunks(chunk) {
        raw.update(part);
        std.update(part);
      }
      assert_eq!(raw.finalize(), compute_crc(&data, 0), "raw chunk={chunk}");
      assert_eq!(std.finalize(), Crc32c::checksum(&data), "std chunk={chunk}");
    }
  }

  #[test]
  fn test_finalize_is_idempotent_and_reset_restores() {
    let mut h = Crc32c::new();
    h.update(b"abc");
    let first = h.finalize();
    assert_eq!(h.finalize(), first);
    h.reset();
    assert_eq!(h.finalize(), Crc32c::checksum(&[]));

    let mut r = Crc32cRaw::with_initial(0xABCD);
    r.update(b"xyz");
    r.reset();
    assert_eq!(r.finalize(), 0xABCD);
  }

  #[test]
  fn test_reset_returns_to_resumed_state() {
    let (a, b) = b"123456789".split_at(4);
    let prefix = Crc32c::checksum(a);
    let mut h = Crc32c::resume(prefix);
    h.update(b);
    assert_eq!(h.finalize(), CHECK);
    h.reset();
    assert_eq!(h.finalize(), prefix);
    h.update(b);
    assert_eq!(h.finalize(), CHECK);

    let mut g = <Crc32c as Checksum>::with_initial(prefix);
    g.update(b"noise");
    Checksum::reset(&mut g);
    assert_eq!(g.finalize(), prefix);
  }

  #[test]
  fn test_with_initial_continues() {
    let (a, b) = b"123456789".split_at(3);
    let mut raw = <Crc32cRaw as Checksum>::with_initial(compute_crc(a, 0));
    raw.update(b);
    assert_eq!(raw.finalize(), CHECK_RAW);

    let mut std = <Crc32c as Checksum>::with_initial(Crc32c::checksum(a));
    std.update(b);
    assert_eq!(std.finalize(), CHECK);
  }

  #[test]
  fn test_combine() {
    let data = gen_bytes(1000, 5);
    let (a, b) = data.split_at(333);
    assert_eq!(
      <Crc32c as ChecksumCombine>::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len()),
      Crc32c::checksum(&data)
    );
    assert_eq!(
      Crc32cRaw::combine(compute_crc(a, 0), compute_crc(b, 0), b.len()),
      compute_crc(&data, 0)
    );
  }

  #[test]
  fn test_vectored() {
    let bufs: [&[u8]; 3] = [b"123", b"", b"456789"];
    assert_eq!(Crc32c::checksum_vectored(&bufs), CHECK);
  }

  #[cfg(feature = "std")]
  #[test]
  fn test_io_write() {
    use std::io::Write;

    let mut h = Crc32c::new();
    h.write_all(b"123456789").unwrap();
    h.flush().unwrap();
    assert_eq!(h.finalize(), CHECK);
  }
}
