//! Encoder Timing Harness
//!
//! Builds an encoder for each sample table and times a tight loop that
//! rewrites slot 0 of the sample key on every iteration and sums the packed
//! keys. The sum is printed so the loop cannot be optimized away.
//!
//! Usage:
//!   cargo run --release --features cli --bin perf_test -- [OPTIONS]
//!
//! Options:
//!   --iterations <n>   Iterations per table (default: i32::MAX)
//!   --table <n>        Run only sample table n (1-7)
//!   --checked          Time the checked path instead of the fast path
//!   --quick            Run 10 million iterations per table
//!   --verbose          Print each encoder's term layout

use keyfold::fixtures::{sample_dimensions, SAMPLE_KEY, SAMPLE_TABLE_COUNT};
use keyfold::prelude::*;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default iterations, one per non-negative `i32`.
const FULL_ITERATIONS: u64 = i32::MAX as u64;

/// Quick mode iterations.
const QUICK_ITERATIONS: u64 = 10_000_000;

/// Result of timing one table.
#[derive(Debug, Clone)]
struct RunResult {
    name: String,
    elapsed: Duration,
    iterations: u64,
    sum: u64,
    rejected: u64,
}

impl RunResult {
    fn ns_per_op(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }
}

#[derive(Debug, Clone)]
struct Options {
    iterations: u64,
    table: Option<usize>,
    checked: bool,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            iterations: FULL_ITERATIONS,
            table: None,
            checked: false,
            verbose: false,
        }
    }
}

fn print_usage() {
    println!("Usage: perf_test [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --iterations <n>   Iterations per table (default: {FULL_ITERATIONS})");
    println!("  --table <n>        Run only sample table n (1-{SAMPLE_TABLE_COUNT})");
    println!("  --checked          Time the checked path instead of the fast path");
    println!("  --quick            Run {QUICK_ITERATIONS} iterations per table");
    println!("  --verbose          Print each encoder's term layout");
    println!("  --help, -h         Show this help message");
}

/// Parses flags; `Ok(None)` means help was printed.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" => {
                i += 1;
                let value = args.get(i).ok_or("--iterations needs a value")?;
                options.iterations = value
                    .parse()
                    .map_err(|e| format!("Invalid iteration count '{value}': {e}"))?;
            }
            "--table" => {
                i += 1;
                let value = args.get(i).ok_or("--table needs a value")?;
                let table: usize = value
                    .parse()
                    .map_err(|e| format!("Invalid table '{value}': {e}"))?;
                if !(1..=SAMPLE_TABLE_COUNT).contains(&table) {
                    return Err(format!("Table must be in 1..={SAMPLE_TABLE_COUNT}"));
                }
                options.table = Some(table);
            }
            "--checked" => options.checked = true,
            "--quick" => options.iterations = QUICK_ITERATIONS,
            "--verbose" => options.verbose = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn run_table(name: &str, encoder: &CompositeEncoder, options: &Options) -> RunResult {
    let mut key = SAMPLE_KEY;
    let mut sum: u64 = 0;
    let mut rejected: u64 = 0;

    let start = Instant::now();
    if options.checked {
        for i in 0..options.iterations {
            key[0] = i as Member;
            match encoder.encode_checked(std::hint::black_box(&key)) {
                Ok(packed) => sum = sum.wrapping_add(packed),
                Err(_) => rejected += 1,
            }
        }
    } else {
        for i in 0..options.iterations {
            key[0] = i as Member;
            sum = sum.wrapping_add(encoder.encode(std::hint::black_box(&key)));
        }
    }
    let elapsed = start.elapsed();

    RunResult {
        name: name.to_string(),
        elapsed,
        iterations: options.iterations,
        sum,
        rejected,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => return,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(2);
        }
    };

    println!("Keyfold Encoder Timing");
    println!("======================");
    println!(
        "{} iterations per table, {} path",
        options.iterations,
        if options.checked { "checked" } else { "fast" }
    );
    println!();

    let tables: Vec<usize> = match options.table {
        Some(table) => vec![table],
        None => (1..=SAMPLE_TABLE_COUNT).collect(),
    };

    let mut results = Vec::with_capacity(tables.len());
    for table in tables {
        let Some(dims) = sample_dimensions(table) else {
            continue;
        };
        let encoder = match CompositeEncoder::from_dimensions(&dims) {
            Ok(encoder) => encoder,
            Err(e) => {
                error!(table, error = %e, "Failed to build encoder");
                continue;
            }
        };

        if options.verbose {
            println!("basic{table}: {encoder}");
        }

        info!(table, capacity = encoder.capacity(), "Timing sample table");
        let result = run_table(&format!("basic{table}"), &encoder, &options);

        if options.checked {
            println!(
                "{}: {} ms. result = {} ({} rejected)",
                result.name,
                result.elapsed.as_millis(),
                result.sum,
                result.rejected
            );
        } else {
            println!(
                "{}: {} ms. result = {}",
                result.name,
                result.elapsed.as_millis(),
                result.sum
            );
        }
        results.push(result);
    }

    println!();
    println!("{:<10} {:>12} {:>10}", "table", "ms", "ns/op");
    for result in &results {
        println!(
            "{:<10} {:>12} {:>10.3}",
            result.name,
            result.elapsed.as_millis(),
            result.ns_per_op()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flags: &[&str]) -> Vec<String> {
        std::iter::once("perf_test")
            .chain(flags.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(&args(&[])).unwrap().unwrap();
        assert_eq!(options.iterations, FULL_ITERATIONS);
        assert_eq!(options.table, None);
        assert!(!options.checked);
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_args(&args(&["--quick", "--table", "3", "--checked"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.iterations, QUICK_ITERATIONS);
        assert_eq!(options.table, Some(3));
        assert!(options.checked);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--table", "9"])).is_err());
        assert!(parse_args(&args(&["--iterations"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_run_table_counts_rejections() {
        let dims = sample_dimensions(7).unwrap();
        let encoder = CompositeEncoder::from_dimensions(&dims).unwrap();
        let options = Options {
            iterations: 16,
            checked: true,
            ..Default::default()
        };

        // Slot 0 is only valid for 7 and 8.
        let result = run_table("basic7", &encoder, &options);
        assert_eq!(result.rejected, 14);
    }
}
