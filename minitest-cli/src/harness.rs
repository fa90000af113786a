//! Harness
//!
//! Owns one instance of every registry plus the shared mock store. Tests are
//! registered through the fluent methods during start-up; afterwards the
//! harness is only read while running.

use minitest_bench::BenchmarkRegistry;
use minitest_core::{
    Apply, Fixture, ParamRegistry, ParamTuple, SuiteRegistry, TestRegistry, TestResult,
};
use minitest_mock::MockStore;
use minitest_report::{LogSink, NullSink};
use std::sync::Arc;

/// Every registry of one test binary
pub struct Harness {
    tests: TestRegistry,
    suites: SuiteRegistry,
    params: ParamRegistry,
    benchmarks: BenchmarkRegistry,
    mocks: Arc<MockStore>,
    custom_sink: bool,
}

impl Harness {
    /// Empty harness; log output is chosen when the harness is run
    pub fn new() -> Self {
        let sink: Arc<dyn LogSink> = Arc::new(NullSink);
        Self {
            tests: TestRegistry::new(Arc::clone(&sink)),
            suites: SuiteRegistry::new(Arc::clone(&sink)),
            params: ParamRegistry::new(Arc::clone(&sink)),
            benchmarks: BenchmarkRegistry::new(sink),
            mocks: Arc::new(MockStore::new()),
            custom_sink: false,
        }
    }

    /// Log every registry into `sink`. Overrides the configured log directory.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.set_sink(sink);
        self.custom_sink = true;
        self
    }

    /// Point every registry at `sink`
    pub fn set_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.tests.set_sink(Arc::clone(&sink));
        self.suites.set_sink(Arc::clone(&sink));
        self.params.set_sink(Arc::clone(&sink));
        self.benchmarks.set_sink(sink);
    }

    /// Whether a sink was installed with [`Harness::with_sink`]
    pub fn has_custom_sink(&self) -> bool {
        self.custom_sink
    }

    /// Cap the number of suites running at once
    pub fn set_jobs(&mut self, jobs: Option<usize>) {
        self.suites.set_jobs(jobs);
    }

    // ─── Registration ────────────────────────────────────────────────────────

    /// Register a flat test
    pub fn test<F>(&mut self, name: &str, action: F) -> &mut Self
    where
        F: Fn() -> TestResult + Send + Sync + 'static,
    {
        self.tests.register(name, action);
        self
    }

    /// Register a flat test with a fixture
    pub fn test_fixture<X, B>(&mut self, name: &str, body: B) -> &mut Self
    where
        X: Fixture + 'static,
        B: Fn(&mut X) -> TestResult + Send + Sync + 'static,
    {
        self.tests.register_fixture::<X, B>(name, body);
        self
    }

    /// Register a test inside `suite`
    pub fn suite_test<F>(&mut self, suite: &str, name: &str, action: F) -> &mut Self
    where
        F: Fn() -> TestResult + Send + Sync + 'static,
    {
        self.suites.register(suite, name, action);
        self
    }

    /// Register a fixture test inside `suite`
    pub fn suite_fixture<X, B>(&mut self, suite: &str, name: &str, body: B) -> &mut Self
    where
        X: Fixture + 'static,
        B: Fn(&mut X) -> TestResult + Send + Sync + 'static,
    {
        self.suites.register_fixture::<X, B>(suite, name, body);
        self
    }

    /// Set-up hook for `suite`
    pub fn suite_setup<F>(&mut self, suite: &str, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.suites.on_setup(suite, hook);
        self
    }

    /// Tear-down hook for `suite`
    pub fn suite_teardown<F>(&mut self, suite: &str, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.suites.on_teardown(suite, hook);
        self
    }

    /// Expand a parameterized test over `data`
    pub fn params<P, F, I>(&mut self, template: &str, test: F, data: I) -> &mut Self
    where
        P: ParamTuple + Send + Sync + 'static,
        F: Apply<P, Output = TestResult> + Send + Sync + 'static,
        I: IntoIterator<Item = P>,
    {
        self.params.register(template, test, data);
        self
    }

    /// Register a benchmark
    pub fn bench<F>(&mut self, name: &str, action: F, iterations: u32) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.benchmarks.register(name, action, iterations);
        self
    }

    /// Register a benchmark calling `func` with fixed arguments
    pub fn bench_with<Args, F>(&mut self, name: &str, func: F, iterations: u32, args: Args) -> &mut Self
    where
        Args: Send + Sync + 'static,
        F: Apply<Args> + Send + Sync + 'static,
    {
        self.benchmarks.register_with(name, func, iterations, args);
        self
    }

    // ─── Access ──────────────────────────────────────────────────────────────

    /// Flat test registry
    pub fn tests(&self) -> &TestRegistry {
        &self.tests
    }

    /// Mutable flat test registry
    pub fn tests_mut(&mut self) -> &mut TestRegistry {
        &mut self.tests
    }

    /// Suite registry
    pub fn suites(&self) -> &SuiteRegistry {
        &self.suites
    }

    /// Mutable suite registry
    pub fn suites_mut(&mut self) -> &mut SuiteRegistry {
        &mut self.suites
    }

    /// Parameterized test registry
    pub fn params_registry(&self) -> &ParamRegistry {
        &self.params
    }

    /// Benchmark registry
    pub fn benchmarks(&self) -> &BenchmarkRegistry {
        &self.benchmarks
    }

    /// Mutable benchmark registry
    pub fn benchmarks_mut(&mut self) -> &mut BenchmarkRegistry {
        &mut self.benchmarks
    }

    /// Mock store shared with the registered tests
    pub fn mocks(&self) -> Arc<MockStore> {
        Arc::clone(&self.mocks)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
