//! Throughput harness: every strategy over one deterministic buffer.
//!
//! Run counts scale with each strategy's expected speed so every row takes a
//! comparable amount of wall time. Bits/cycle assumes a 4 GHz clock.

use core::{hint::black_box, str::FromStr};
use std::{process::ExitCode, time::Instant};

use crcfold::{ConstantTable, FoldEngine, Strategy, selected_backend};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Args {
  print_table: bool,
  bytes: usize,
  runs_scale: f64,
  seed: u64,
}

impl Default for Args {
  fn default() -> Self {
    Self {
      print_table: false,
      bytes: 900 * 1024,
      runs_scale: 1.0,
      seed: 5,
    }
  }
}

fn parse_args() -> Result<Args, String> {
  let mut args = Args::default();
  let mut it = std::env::args().skip(1);
  while let Some(arg) = it.next() {
    match arg.as_str() {
      "--" => continue,
      "--print-table" => args.print_table = true,
      "--bytes" => {
        let Some(value) = it.next() else {
          return Err("--bytes requires a value".to_owned());
        };
        args.bytes = parse_value("--bytes", &value)?;
      }
      "--runs-scale" => {
        let Some(value) = it.next() else {
          return Err("--runs-scale requires a value".to_owned());
        };
        let scale: f64 = parse_value("--runs-scale", &value)?;
        if !(scale > 0.0 && scale.is_finite()) {
          return Err(format!("Invalid value for --runs-scale: {value}"));
        }
        args.runs_scale = scale;
      }
      "--seed" => {
        let Some(value) = it.next() else {
          return Err("--seed requires a value".to_owned());
        };
        args.seed = parse_value("--seed", &value)?;
      }
      "--help" | "-h" => {
        print_help();
        return Err(String::new());
      }
      other => return Err(format!("Unknown arg: {other}")),
    }
  }
  Ok(args)
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
  T::from_str(value).map_err(|_| format!("Invalid value for {flag}: {value}"))
}

fn print_help() {
  eprintln!(
    "\
crcfold-bench: CRC-32C strategy throughput harness

USAGE:
  cargo run -p crcfold --release --features cli --bin crcfold-bench -- [OPTIONS]

OPTIONS:
  --print-table           Print the fold constant table and exit
  --bytes <n>             Buffer size in bytes (default 921600)
  --runs-scale <f>        Multiply every strategy's run count (default 1.0)
  --seed <n>              Buffer generator seed (default 5)

ENVIRONMENT:
  CRCFOLD_FORCE           auto | portable | hardware
  CRCFOLD_LEAF_BLOCKS     Minimum 16-byte units per fold (default 7)
  CRCFOLD_MAX_BLOCKS      Maximum 16-byte units per fold (default 128)
  RUST_LOG                Log filter, e.g. crcfold=debug
"
  );
}

/// Baseline run count per strategy.
const fn base_runs(strategy: Strategy) -> usize {
  match strategy {
    Strategy::BitSerial => 20,
    Strategy::BitSerialBranchless => 45,
    Strategy::Tabular1 => 60,
    Strategy::Tabular2 => 180,
    Strategy::Tabular4 => 300,
    Strategy::Tabular8 => 500,
    Strategy::Tabular16 => 600,
    Strategy::Native1 => 1100,
    Strategy::Native8 => 1500,
    Strategy::Fold => 9000,
  }
}

/// Deterministic pseudo-random bytes (xorshift64*).
fn generate(len: usize, seed: u64) -> Vec<u8> {
  let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
  (0..len)
    .map(|_| {
      state ^= state >> 12;
      state ^= state << 25;
      state ^= state >> 27;
      (state.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 56) as u8
    })
    .collect()
}

fn print_table() {
  for row in ConstantTable::shared().as_slice().chunks(8) {
    let line: Vec<String> = row.iter().map(|v| format!("0x{v:08x}")).collect();
    println!("{},", line.join(", "));
  }
}

fn run(args: &Args) {
  let engine = FoldEngine::new();
  info!(
    backend = selected_backend(),
    cpu = %platform::describe(),
    leaf_blocks = engine.leaf_blocks(),
    max_blocks = engine.max_blocks(),
    bytes = args.bytes,
    seed = args.seed,
    "starting"
  );

  println!("\nGenerating test data...");
  let data = generate(args.bytes, args.seed);

  println!("Starting tests (backend: {})...\n", selected_backend());
  let rule = "--------------------------|------------|---------------------------------";
  println!("{rule}");
  println!(" Strategy                 | Result     | Performance");
  println!("{rule}");

  let bytes = args.bytes as f64;
  for strategy in Strategy::ALL {
    let runs = ((base_runs(strategy) as f64 * args.runs_scale).ceil() as usize).max(1);

    let start = Instant::now();
    let mut result = 0u32;
    for _ in 0..runs {
      result = black_box(strategy.compute(black_box(&data), 0));
    }
    let ns = start.elapsed().as_nanos() as f64 / runs as f64;
    debug!(strategy = strategy.name(), runs, ns_per_run = ns, "measured");

    let (mbps, bits_per_cycle) = if ns > 0.0 { (bytes / ns * 1e3, 2.0 * bytes / ns) } else { (0.0, 0.0) };
    println!(
      " {:<24} | 0x{result:08x} | {mbps:9.1} MB/s | {bits_per_cycle:.2} bits/cycle",
      strategy.name()
    );
  }

  println!("{rule}");
  println!("\nDone.\n");
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = match parse_args() {
    Ok(args) => args,
    Err(msg) if msg.is_empty() => return ExitCode::SUCCESS,
    Err(msg) => {
      eprintln!("{msg}");
      print_help();
      return ExitCode::from(2);
    }
  };

  if args.print_table {
    print_table();
    return ExitCode::SUCCESS;
  }

  run(&args);
  ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_generate_is_deterministic() {
    assert_eq!(generate(64, 5), generate(64, 5));
    assert_ne!(generate(64, 5), generate(64, 6));
    assert!(generate(0, 5).is_empty());
  }

  #[test]
  fn test_every_strategy_has_runs() {
    for s in Strategy::ALL {
      assert!(base_runs(s) > 0);
    }
  }
}
