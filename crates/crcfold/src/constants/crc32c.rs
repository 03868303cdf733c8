//! CRC-32C (Castagnoli) constants.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! Used by: iSCSI, SCTP, Btrfs, ext4, RocksDB, LevelDB

/// CRC-32C polynomial in reflected (bit-reversed) form.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// CRC-32C polynomial in normal form with the explicit `x^32` term.
pub const POLY_FULL: u64 = 0x1_1EDC_6F41;

/// Raw register (seed 0, no inversion) of `"123456789"`.
pub const CHECK_RAW: u32 = 0x58E3_FA20;

/// Standard CRC-32C (init and xorout `!0`) of `"123456789"`.
pub const CHECK: u32 = 0xE306_9283;

/// Slicing-by-16 lookup tables (16 * 256 * 4 = 16 KiB).
///
/// Slice-by-N for every `N <= 16` reads a prefix of these.
pub static TABLES: super::Aligned64<[[u32; 256]; 16]> = super::Aligned64(super::tables::slicing_tables_32(POLYNOMIAL));
