//! Run Planner
//!
//! Turns command-line selections into an ordered list of run operations.
//!
//! Steps always execute in the same order regardless of flag order:
//! flat tests, parameterized tests, benchmarks, one suite, all suites.
//! Without any selection flag the default plan runs everything.

use crate::Cli;
use crate::config::MiniConfig;

/// One run operation of the harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Every flat test
    AllTests,
    /// Flat tests whose name starts with the prefix
    Prefix(String),
    /// Flat tests with exactly this name
    Single(String),
    /// Flat tests named `DISABLED_*`
    Disabled,
    /// Every parameterized case
    Params,
    /// Every benchmark
    AllBenchmarks,
    /// One benchmark by name
    Benchmark(String),
    /// One suite, optionally narrowed to one test
    Suite {
        /// Suite name
        name: String,
        /// Test within the suite
        test: Option<String>,
    },
    /// Every suite, concurrently
    AllSuites,
}

/// Ordered run operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Steps in execution order
    pub steps: Vec<Step>,
}

impl ExecutionPlan {
    /// Whether nothing will run
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn has_selection(cli: &Cli) -> bool {
    cli.prefix.is_some()
        || cli.exact.is_some()
        || cli.disabled
        || cli.params
        || cli.suite.is_some()
        || cli.suites
        || cli.bench
        || cli.bench_name.is_some()
}

/// Build the plan for a parsed command line
pub fn build_plan(cli: &Cli, config: &MiniConfig) -> ExecutionPlan {
    let mut steps = Vec::new();

    if !has_selection(cli) {
        steps.push(Step::AllTests);
        if config.runner.run_disabled {
            steps.push(Step::Disabled);
        }
        steps.push(Step::Params);
        steps.push(Step::AllBenchmarks);
        steps.push(Step::AllSuites);
        return ExecutionPlan { steps };
    }

    if let Some(prefix) = &cli.prefix {
        steps.push(Step::Prefix(prefix.clone()));
    }
    if let Some(name) = &cli.exact {
        steps.push(Step::Single(name.clone()));
    }
    if cli.disabled {
        steps.push(Step::Disabled);
    }
    if cli.params {
        steps.push(Step::Params);
    }
    match &cli.bench_name {
        Some(name) => steps.push(Step::Benchmark(name.clone())),
        None if cli.bench => steps.push(Step::AllBenchmarks),
        None => {}
    }
    if let Some(name) = &cli.suite {
        steps.push(Step::Suite {
            name: name.clone(),
            test: cli.test.clone(),
        });
    }
    if cli.suites {
        steps.push(Step::AllSuites);
    }

    ExecutionPlan { steps }
}
