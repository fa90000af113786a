#![warn(missing_docs)]
//! # minitest
//!
//! Minimal unit-testing and micro-benchmarking harness for a single test binary.
//!
//! - **Flat tests**: ordered registry with prefix, exact-name and `DISABLED_` runs
//! - **Suites**: named groups with set-up/tear-down hooks, run concurrently
//! - **Parameterized tests**: one named case per argument tuple
//! - **Benchmarks**: arithmetic-mean timing over a fixed iteration count
//! - **Mocks**: type-keyed stubs behind typed `MockFn` handles
//! - **Containment**: a failing or panicking case never stops its batch
//! - **Logs**: one `Logs/test_log_<category>_<timestamp>.log` per run
//!
//! ## Quick Start
//!
//! ```ignore
//! use minitest::prelude::*;
//! use std::process::ExitCode;
//!
//! fn main() -> ExitCode {
//!     let mut harness = Harness::new();
//!     harness
//!         .test("TestAddition", || {
//!             check_eq!(2 + 3, 5);
//!             Ok(())
//!         })
//!         .suite_test("MathTests", "TestMultiplication", || {
//!             check_eq!(4 * 2, 8);
//!             Ok(())
//!         })
//!         .bench("TestLoopPerformance", || { std::hint::black_box((0..1_000).sum::<u64>()); }, 10);
//!
//!     minitest::main(harness)
//! }
//! ```

use std::process::ExitCode;

// Re-export core types
pub use minitest_core::{
    Apply, DISABLED_PREFIX, Failure, FailureKind, Fixture, Hook, ParamRegistry, ParamTuple,
    SuiteError, SuiteRegistry, TestCase, TestFn, TestRegistry, TestResult, execute_case,
    fixture_case, print_totals, run_cases,
};

// Re-export assertion macros
pub use minitest_core::{check, check_eq, check_err, check_false, check_ne, check_panics, fail};

// Re-export benchmarks
pub use minitest_bench::{
    BenchFn, BenchmarkCase, BenchmarkRegistry, Timer, bench_function, bench_function_with,
    mean_millis,
};

// Re-export mocks
pub use minitest_mock::{MockFn, MockStore, mock_fn};

// Re-export reporting
pub use minitest_report::{
    BenchmarkRecord, CaseRecord, CaseStatus, FileSink, LogLevel, LogSession, LogSink,
    MemorySink, NullSink, OutputFormat, Report, RunSummary,
};

// Re-export the integrator surface
pub use minitest_cli::{
    Cli, ExecutionPlan, Harness, MiniConfig, RunOutcome, Step, build_plan, execute_plan,
    format_listing, run_with_cli, run_with_config,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Failure, Fixture, Harness, MockFn, MockStore, TestResult, check, check_eq, check_err,
        check_false, check_ne, check_panics, fail, mock_fn,
    };
}

/// Run the minitest CLI harness.
///
/// Call this from your test binary's `main()`:
/// ```ignore
/// fn main() {
///     let outcome = minitest::run(harness).unwrap();
///     std::process::exit(outcome.exit_code().into());
/// }
/// ```
pub use minitest_cli::run;

/// Run the harness and map the outcome to a process exit code.
///
/// Errors that stop the whole invocation are printed to stderr.
pub fn main(harness: Harness) -> ExitCode {
    match run(harness) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("minitest: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
