//! Flat Test Registry
//!
//! One ordered namespace of test cases. Run operations select a subsequence
//! by name predicate and execute it in registration order:
//!
//! | Operation        | Predicate                       | Log category       |
//! |------------------|---------------------------------|--------------------|
//! | `run_all`        | every case                      | `AllTests`         |
//! | `run_by_prefix`  | name starts with prefix         | `Prefix_<prefix>`  |
//! | `run_single`     | name equals given name          | `Single_<name>`    |
//! | `run_disabled`   | name starts with `DISABLED_`    | `DisabledTests`    |
//!
//! `run_all` and `run_by_prefix` do not skip `DISABLED_` cases; callers pick
//! the filter.

use crate::case::{Fixture, TestCase, fixture_case};
use crate::outcome::TestResult;
use crate::runner::{print_totals, run_cases};
use minitest_report::{LogSink, NullSink, RunSummary};
use std::sync::Arc;

/// Name prefix marking a disabled test
pub const DISABLED_PREFIX: &str = "DISABLED_";

/// Ordered registry of flat test cases
pub struct TestRegistry {
    cases: Vec<TestCase>,
    sink: Arc<dyn LogSink>,
}

impl TestRegistry {
    /// Empty registry logging into `sink`
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            cases: Vec::new(),
            sink,
        }
    }

    /// Replace the log sink
    pub fn set_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.sink = sink;
    }

    /// Append a case. Duplicate names are kept as separate entries.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: Fn() -> TestResult + Send + Sync + 'static,
    {
        self.register_case(TestCase::new(name, action))
    }

    /// Append a case whose body receives a fresh fixture
    pub fn register_fixture<X, B>(&mut self, name: impl Into<String>, body: B) -> &mut Self
    where
        X: Fixture + 'static,
        B: Fn(&mut X) -> TestResult + Send + Sync + 'static,
    {
        self.register_case(fixture_case::<X, B>(name, body))
    }

    /// Append a prebuilt case
    pub fn register_case(&mut self, case: TestCase) -> &mut Self {
        tracing::trace!(name = case.name(), "registered test");
        self.cases.push(case);
        self
    }

    /// Number of registered cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no case is registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Case names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(TestCase::name)
    }

    /// Run every case
    pub fn run_all(&self) -> RunSummary {
        println!("** Running All Tests **");
        self.run_filtered(|_| true, "AllTests")
    }

    /// Run cases whose name starts with `prefix`
    pub fn run_by_prefix(&self, prefix: &str) -> RunSummary {
        println!("** Running Tests with Prefix '{}' **", prefix);
        self.run_filtered(|name| name.starts_with(prefix), &format!("Prefix_{}", prefix))
    }

    /// Run cases named exactly `name`
    pub fn run_single(&self, name: &str) -> RunSummary {
        println!("** Running Single Tests '{}' **", name);
        let summary = self.run_filtered(|n| n == name, &format!("Single_{}", name));
        if summary.total == 0 {
            tracing::warn!(name, "no test registered under this name");
        }
        summary
    }

    /// Run cases whose name starts with `DISABLED_`
    pub fn run_disabled(&self) -> RunSummary {
        println!("** Running Disabled Tests **");
        self.run_filtered(|name| name.starts_with(DISABLED_PREFIX), "DisabledTests")
    }

    /// Run the ordered subsequence accepted by `filter`, logging under `category`.
    pub fn run_filtered<P>(&self, filter: P, category: &str) -> RunSummary
    where
        P: Fn(&str) -> bool,
    {
        let mut session = self.sink.open(category);
        let selected = self.cases.iter().filter(|case| filter(case.name()));
        let summary = run_cases(category, selected, session.as_mut());
        print_totals(&summary);
        summary
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NullSink))
    }
}
