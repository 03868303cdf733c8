//! Runtime configuration (overrides + fold geometry).
//!
//! This module centralizes the selection knobs:
//! - optional forced backend (`CRCFOLD_FORCE`)
//! - leaf and maximum block counts for the default engine
//!   (`CRCFOLD_LEAF_BLOCKS`, `CRCFOLD_MAX_BLOCKS`)
//!
//! Safety note: forced modes are always clamped to detected CPU capabilities.

use crate::{
  dispatch::Backend,
  fold::{ConstantTable, DEFAULT_LEAF_BLOCKS, DEFAULT_MAX_BLOCKS},
};

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Force {
  /// Fastest available backend.
  #[default]
  Auto,
  /// Table-driven primitives, even when hardware is available.
  Portable,
  /// Hardware CRC step + carryless multiply (if available).
  ///
  /// - x86_64: SSE4.2 `crc32` + PCLMULQDQ
  /// - aarch64: CRC extension + PMULL
  Hardware,
}

impl Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hardware => "hardware",
    }
  }

  /// Parse a force mode, accepting the documented aliases (case-insensitive).
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("table") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hardware")
      || value.eq_ignore_ascii_case("hw")
      || value.eq_ignore_ascii_case("hwcrc")
      || value.eq_ignore_ascii_case("native")
    {
      return Some(Self::Hardware);
    }
    None
  }
}

/// Effective configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoldConfig {
  /// Requested force mode (env).
  pub requested_force: Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Force,
  /// Smallest block count folded with two lanes.
  pub leaf_blocks: usize,
  /// Largest block count per fold step.
  pub max_blocks: usize,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Force,
  leaf_blocks: Option<usize>,
  max_blocks: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn parse_usize(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
      return None;
    }
    value.parse::<usize>().ok()
  }

  fn parse_force(name: &str) -> Option<Force> {
    let value = std::env::var(name).ok()?;
    Force::parse(&value)
  }

  Overrides {
    force: parse_force("CRCFOLD_FORCE").unwrap_or(Force::Auto),
    leaf_blocks: parse_usize("CRCFOLD_LEAF_BLOCKS"),
    max_blocks: parse_usize("CRCFOLD_MAX_BLOCKS"),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
fn clamp_force(requested: Force, hardware_available: bool) -> Force {
  match requested {
    Force::Auto | Force::Portable => requested,
    Force::Hardware if hardware_available => Force::Hardware,
    Force::Hardware => Force::Auto,
  }
}

/// Apply overrides on top of the defaults.
///
/// Block counts end up in `1 <= leaf_blocks <= max_blocks <= capacity`
/// (a zero-capacity table still yields `1`; engine construction rejects it).
fn resolve(ov: Overrides, hardware_available: bool, capacity: usize) -> FoldConfig {
  let max_blocks = ov.max_blocks.unwrap_or(DEFAULT_MAX_BLOCKS).min(capacity).max(1);
  let leaf_blocks = ov.leaf_blocks.unwrap_or(DEFAULT_LEAF_BLOCKS).clamp(1, max_blocks);

  FoldConfig {
    requested_force: ov.force,
    effective_force: clamp_force(ov.force, hardware_available),
    leaf_blocks,
    max_blocks,
  }
}

/// Get the effective configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> FoldConfig {
  resolve(
    overrides(),
    Backend::hardware().is_some(),
    ConstantTable::shared().capacity(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_force_parse_aliases() {
    assert_eq!(Force::parse("auto"), Some(Force::Auto));
    assert_eq!(Force::parse(" PORTABLE "), Some(Force::Portable));
    assert_eq!(Force::parse("table"), Some(Force::Portable));
    for alias in ["hardware", "hw", "HwCrc", "native"] {
      assert_eq!(Force::parse(alias), Some(Force::Hardware), "{alias}");
    }
    assert_eq!(Force::parse(""), None);
    assert_eq!(Force::parse("avx512"), None);
  }

  #[test]
  fn test_force_as_str_round_trips() {
    for force in [Force::Auto, Force::Portable, Force::Hardware] {
      assert_eq!(Force::parse(force.as_str()), Some(force));
    }
  }

  #[test]
  fn test_defaults() {
    let cfg = resolve(Overrides::default(), true, 256);
    assert_eq!(cfg.leaf_blocks, DEFAULT_LEAF_BLOCKS);
    assert_eq!(cfg.max_blocks, DEFAULT_MAX_BLOCKS);
    assert_eq!(cfg.effective_force, Force::Auto);
  }

  #[test]
  fn test_hardware_clamped_without_support() {
    let ov = Overrides {
      force: Force::Hardware,
      ..Overrides::default()
    };
    assert_eq!(resolve(ov, false, 256).effective_force, Force::Auto);
    assert_eq!(resolve(ov, false, 256).requested_force, Force::Hardware);
    assert_eq!(resolve(ov, true, 256).effective_force, Force::Hardware);
  }

  #[test]
  fn test_block_counts_are_clamped() {
    let ov = Overrides {
      force: Force::Auto,
      leaf_blocks: Some(0),
      max_blocks: Some(10_000),
    };
    let cfg = resolve(ov, false, 256);
    assert_eq!(cfg.max_blocks, 256);
    assert_eq!(cfg.leaf_blocks, 1);

    let ov = Overrides {
      force: Force::Auto,
      leaf_blocks: Some(50),
      max_blocks: Some(20),
    };
    let cfg = resolve(ov, false, 256);
    assert_eq!((cfg.leaf_blocks, cfg.max_blocks), (20, 20));

    let ov = Overrides {
      force: Force::Auto,
      leaf_blocks: None,
      max_blocks: Some(0),
    };
    let cfg = resolve(ov, false, 256);
    assert_eq!((cfg.leaf_blocks, cfg.max_blocks), (1, 1));
  }

  #[test]
  fn test_get_is_consistent() {
    let cfg = get();
    assert!(cfg.leaf_blocks >= 1);
    assert!(cfg.leaf_blocks <= cfg.max_blocks);
    assert!(cfg.max_blocks <= ConstantTable::shared().capacity());
  }
}
