//! Parameterized Test Expander
//!
//! Turns a data set of argument tuples plus one test function into one named
//! case per tuple:
//!
//! ```text
//! template: TestParamsAddition      data: [(1, 2, 3), (4, 5, 9)]
//!   ─▶ TestParamsAddition(1, 2, 3)
//!   ─▶ TestParamsAddition(4, 5, 9)
//! ```
//!
//! Expanded cases live in their own registry and run with the same
//! PASS/FAIL classification as flat tests.

use crate::apply::{Apply, ParamTuple};
use crate::case::TestCase;
use crate::outcome::TestResult;
use crate::runner::{print_totals, run_cases};
use minitest_report::{LogSink, NullSink, RunSummary};
use std::sync::Arc;

/// Registry of expanded parameterized cases
pub struct ParamRegistry {
    cases: Vec<TestCase>,
    sink: Arc<dyn LogSink>,
}

impl ParamRegistry {
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

    /// Expand `template` over `data`, one case per tuple, in data order.
    ///
    /// An empty data set registers nothing.
    pub fn register<P, F, I>(&mut self, template: &str, test: F, data: I) -> &mut Self
    where
        P: ParamTuple + Send + Sync + 'static,
        F: Apply<P, Output = TestResult> + Send + Sync + 'static,
        I: IntoIterator<Item = P>,
    {
        let test = Arc::new(test);
        let before = self.cases.len();

        for params in data {
            let name = format!("{}{}", template, params.describe());
            let test = Arc::clone(&test);
            self.cases
                .push(TestCase::new(name, move || Apply::apply(&*test, &params)));
        }

        tracing::trace!(
            template,
            expanded = self.cases.len() - before,
            "registered parameterized test"
        );
        self
    }

    /// Number of expanded cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no case is registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Expanded case names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(TestCase::name)
    }

    /// Run every expanded case
    pub fn run_all(&self) -> RunSummary {
        let mut session = self.sink.open("ParamTests");
        let summary = run_cases("ParamTests", &self.cases, session.as_mut());
        print_totals(&summary);
        summary
    }
}

impl Default for ParamRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NullSink))
    }
}
