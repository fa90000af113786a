#![warn(missing_docs)]
//! minitest Bench - Mean-Time Micro-Benchmarks
//!
//! Named callables are registered with an iteration count, run back-to-back
//! and reported as the arithmetic mean of per-iteration wall-clock time.
//! There is no warm-up, outlier rejection or variance reporting.
//!
//! ```ignore
//! use minitest_bench::BenchmarkRegistry;
//!
//! let mut benches = BenchmarkRegistry::default();
//! benches.register("BenchmarkSort", || {
//!     let mut v: Vec<u32> = (0..1_000).rev().collect();
//!     v.sort();
//! }, 5);
//! benches.run_all();
//! ```

mod engine;
mod measure;

pub use engine::{BenchFn, BenchmarkCase, BenchmarkRegistry, bench_function, bench_function_with};
pub use measure::{Timer, mean_millis};
