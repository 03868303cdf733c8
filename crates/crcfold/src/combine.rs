//! CRC combination.
//!
//! `crc(A ++ B)` from `crc(A)`, `crc(B)` and `len(B)` in O(log len(B)).
//!
//! Appending `len(B)` zero bytes to A is linear over GF(2), so it is a 32x32
//! bit matrix. The operator for one zero bit is built from the polynomial,
//! squared three times to get one zero byte, then raised to `len(B)` by
//! square-and-multiply. XORing `crc(B)` accounts for B's own content.
//!
//! The same formula serves the raw register (seed 0, no xorout) and the
//! standard CRC-32C: with `init == xorout` the affine terms cancel.

// SAFETY: matrix rows are indexed by bit positions (< 32).
#![allow(clippy::indexing_slicing)]

use crate::constants::crc32c::POLYNOMIAL;

type Matrix = [u32; 32];

/// Multiply a 32x32 GF(2) matrix by a 32-bit vector.
#[inline]
fn matrix_times(mat: &Matrix, vec: u32) -> u32 {
  let mut sum = 0u32;
  let mut v = vec;
  while v != 0 {
    sum ^= mat[v.trailing_zeros() as usize];
    v &= v - 1;
  }
  sum
}

/// `mat * mat`.
#[inline]
fn matrix_square(mat: &Matrix) -> Matrix {
  core::array::from_fn(|i| matrix_times(mat, mat[i]))
}

/// Operator for one zero bit under a reflected polynomial.
#[inline]
fn one_zero_bit(poly: u32) -> Matrix {
  core::array::from_fn(|i| if i == 0 { poly } else { 1u32 << (i - 1) })
}

/// Advance a raw register over `len` zero bytes (reflected `poly`).
#[must_use]
pub fn shift_poly(poly: u32, crc: u32, len: usize) -> u32 {
  let mut op = one_zero_bit(poly);
  op = matrix_square(&op); // x^2
  op = matrix_square(&op); // x^4
  op = matrix_square(&op); // x^8

  let mut crc = crc;
  let mut len = len as u64;
  while len != 0 {
    if len & 1 != 0 {
      crc = matrix_times(&op, crc);
    }
    len >>= 1;
    if len != 0 {
      op = matrix_square(&op);
    }
  }
  crc
}

/// Combine two CRCs of a reflected polynomial whose `init == xorout`.
#[inline]
#[must_use]
pub fn combine_poly(poly: u32, crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  if len_b == 0 {
    return crc_a;
  }
  shift_poly(poly, crc_a, len_b) ^ crc_b
}

/// Raw CRC-32C register after `len` zero bytes.
#[inline]
#[must_use]
pub fn crc32c_shift(crc: u32, len: usize) -> u32 {
  shift_poly(POLYNOMIAL, crc, len)
}

/// Combine two CRC-32C values (raw or standard).
///
/// ```
/// use crcfold::{combine::crc32c_combine, compute_crc};
///
/// let (a, b) = b"hello world".split_at(6);
/// let whole = compute_crc(b"hello world", 0);
/// assert_eq!(crc32c_combine(compute_crc(a, 0), compute_crc(b, 0), b.len()), whole);
/// ```
#[inline]
#[must_use]
pub fn crc32c_combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  combine_poly(POLYNOMIAL, crc_a, crc_b, len_b)
}
