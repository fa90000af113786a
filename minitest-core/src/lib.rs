#![warn(missing_docs)]
//! minitest Core - Test Registration and Execution
//!
//! This crate provides the registries and the runner behind minitest:
//! - `TestRegistry`: flat, ordered test namespace with prefix/single/disabled filters
//! - `SuiteRegistry`: named groups with set-up/tear-down hooks, run concurrently
//! - `ParamRegistry`: expands a data set into one named case per tuple
//! - `Failure` / `TestResult`: tagged failure signaling plus assertion macros
//!
//! Every run executes cases behind a per-case containment boundary, so a
//! failing or panicking case is recorded and the batch moves on.
//!
//! ```ignore
//! use minitest_core::{TestRegistry, TestResult, check_eq};
//!
//! let mut tests = TestRegistry::default();
//! tests.register("TestAddition", || -> TestResult {
//!     check_eq!(2 + 3, 5);
//!     Ok(())
//! });
//! let summary = tests.run_all();
//! assert_eq!(summary.failed, 0);
//! ```

#[macro_use]
mod assert;
mod apply;
mod case;
mod outcome;
mod params;
mod registry;
mod runner;
mod suite;

pub use apply::{Apply, ParamTuple};
pub use case::{Fixture, TestCase, TestFn, fixture_case};
pub use outcome::{Failure, FailureKind, TestResult};
pub use params::ParamRegistry;
pub use registry::{DISABLED_PREFIX, TestRegistry};
pub use runner::{execute_case, print_totals, run_cases};
pub use suite::{Hook, SuiteError, SuiteRegistry};
