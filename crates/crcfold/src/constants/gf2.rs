//! GF(2) polynomial arithmetic for 32-bit CRC constants.
//!
//! Everything here is `const fn` so fold multipliers and combine operators can
//! be derived (and cross-checked) at compile time.
//!
//! Polynomials are held in *normal* bit order (bit `k` is the coefficient of
//! `x^k`). `poly_full` carries the explicit `x^32` term, e.g. `0x1_1EDC_6F41`
//! for CRC-32C.

/// Bit-reverse a 32-bit value: normal order <-> reflected (LSB-first) order.
#[inline]
#[must_use]
pub const fn reflect32(x: u32) -> u32 {
  x.reverse_bits()
}

/// Carryless (GF(2)) product of two 64-bit polynomials.
///
/// Schoolbook shift-and-xor; the result has degree at most 126.
#[inline]
#[must_use]
pub const fn clmul64(a: u64, b: u64) -> u128 {
  let mut product: u128 = 0;
  let mut i = 0u32;
  while i < 64 {
    if (b >> i) & 1 != 0 {
      product ^= (a as u128) << i;
    }
    i += 1;
  }
  product
}

/// Multiply two polynomials of degree < 32 and reduce mod `poly_full`.
#[inline]
#[must_use]
pub const fn gf2_mul_mod_32(a: u64, b: u64, poly_full: u64) -> u64 {
  // At most 63 bits: a and b are both below x^32.
  let mut result = clmul64(a & 0xFFFF_FFFF, b & 0xFFFF_FFFF) as u64;

  let mut bit = 62u32;
  while bit >= 32 {
    if (result >> bit) & 1 != 0 {
      result ^= poly_full << (bit - 32);
    }
    bit -= 1;
  }

  result & 0xFFFF_FFFF
}

/// Compute `x^n mod poly_full` by square-and-multiply.
#[inline]
#[must_use]
pub const fn xpow_mod_32(n: u32, poly_full: u64) -> u64 {
  if n < 32 {
    return 1u64 << n;
  }

  let mut result: u64 = 1; // x^0
  let mut base: u64 = 2; // x^1
  let mut exp = n;

  while exp > 0 {
    if exp & 1 != 0 {
      result = gf2_mul_mod_32(result, base, poly_full);
    }
    base = gf2_mul_mod_32(base, base, poly_full);
    exp >>= 1;
  }

  result
}
