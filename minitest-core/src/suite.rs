//! Suite Registry
//!
//! Named, insertion-ordered groups of cases with optional per-suite set-up
//! and tear-down hooks.
//!
//! `run_suite` brackets the selected cases with the suite's hooks:
//!
//! ```text
//! set-up ─▶ case 1 ─▶ case 2 ─▶ ... ─▶ case N ─▶ tear-down
//! ```
//!
//! Cases are contained individually, so tear-down runs no matter how many
//! cases fail. Hooks themselves are not contained: a panicking hook ends the
//! suite run.
//!
//! `run_all_suites` runs each suite on its own pool thread and joins them
//! all. Cases inside a suite stay sequential; suites interleave freely.

use crate::case::{Fixture, TestCase, fixture_case};
use crate::outcome::TestResult;
use crate::runner::run_cases;
use fxhash::FxHashMap;
use minitest_report::{LogSink, NullSink, RunSummary};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Suite lookup and scheduling failures
#[derive(Debug, Error)]
pub enum SuiteError {
    /// No suite with this name
    #[error("Test suite '{0}' not found.")]
    UnknownSuite(String),

    /// The suite exists but has no case with this name
    #[error("Test '{test}' not found in suite '{suite}'.")]
    UnknownTest {
        /// Suite name
        suite: String,
        /// Requested case name
        test: String,
    },

    /// Worker threads for concurrent suites could not be started
    #[error("Failed to build suite worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Per-suite set-up or tear-down action
pub type Hook = Arc<dyn Fn() + Send + Sync>;

/// Registry of named suites
pub struct SuiteRegistry {
    suites: BTreeMap<String, Vec<TestCase>>,
    setups: FxHashMap<String, Hook>,
    teardowns: FxHashMap<String, Hook>,
    sink: Arc<dyn LogSink>,
    jobs: Option<usize>,
}

impl SuiteRegistry {
    /// Empty registry logging into `sink`
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            suites: BTreeMap::new(),
            setups: FxHashMap::default(),
            teardowns: FxHashMap::default(),
            sink,
            jobs: None,
        }
    }

    /// Replace the log sink
    pub fn set_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.sink = sink;
    }

    /// Cap the number of suites running at once (`None`: one thread per suite)
    pub fn set_jobs(&mut self, jobs: Option<usize>) {
        self.jobs = jobs;
    }

    /// Append a case to `suite`, creating the suite on first use
    pub fn register<F>(
        &mut self,
        suite: impl Into<String>,
        test: impl Into<String>,
        action: F,
    ) -> &mut Self
    where
        F: Fn() -> TestResult + Send + Sync + 'static,
    {
        self.register_case(suite, TestCase::new(test, action))
    }

    /// Append a fixture case to `suite`
    pub fn register_fixture<X, B>(
        &mut self,
        suite: impl Into<String>,
        test: impl Into<String>,
        body: B,
    ) -> &mut Self
    where
        X: Fixture + 'static,
        B: Fn(&mut X) -> TestResult + Send + Sync + 'static,
    {
        self.register_case(suite, fixture_case::<X, B>(test, body))
    }

    /// Append a prebuilt case to `suite`
    pub fn register_case(&mut self, suite: impl Into<String>, case: TestCase) -> &mut Self {
        self.suites.entry(suite.into()).or_default().push(case);
        self
    }

    /// Install the set-up hook of `suite`, replacing any earlier one
    pub fn on_setup<F>(&mut self, suite: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.setups.insert(suite.into(), Arc::new(hook));
        self
    }

    /// Install the tear-down hook of `suite`, replacing any earlier one
    pub fn on_teardown<F>(&mut self, suite: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.teardowns.insert(suite.into(), Arc::new(hook));
        self
    }

    /// Invoke the set-up hook of `suite`, if any
    pub fn setup_suite(&self, suite: &str) {
        if let Some(hook) = self.setups.get(suite) {
            tracing::debug!(suite, "running suite set-up");
            hook();
        }
    }

    /// Invoke the tear-down hook of `suite`, if any
    pub fn teardown_suite(&self, suite: &str) {
        if let Some(hook) = self.teardowns.get(suite) {
            tracing::debug!(suite, "running suite tear-down");
            hook();
        }
    }

    /// Known suite names, each exactly once
    pub fn list_suites(&self) -> Vec<&str> {
        self.suites.keys().map(String::as_str).collect()
    }

    /// Case names of `suite` in registration order
    pub fn case_names(&self, suite: &str) -> Option<Vec<&str>> {
        self.suites
            .get(suite)
            .map(|cases| cases.iter().map(TestCase::name).collect())
    }

    /// Number of suites
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Whether no suite exists
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// Run a whole suite, or only the case named `test` within it.
    ///
    /// Lookup failures are printed to stderr and returned; nothing runs and
    /// no hook is called in that case.
    pub fn run_suite(&self, suite: &str, test: Option<&str>) -> Result<RunSummary, SuiteError> {
        let selected = self.select(suite, test).inspect_err(|e| {
            eprintln!("[ERROR] {}", e);
        })?;

        self.setup_suite(suite);
        let summary = self.run_tests(selected, suite);
        self.teardown_suite(suite);

        Ok(summary)
    }

    fn select(&self, suite: &str, test: Option<&str>) -> Result<Vec<&TestCase>, SuiteError> {
        let cases = self
            .suites
            .get(suite)
            .ok_or_else(|| SuiteError::UnknownSuite(suite.to_string()))?;

        match test.filter(|t| !t.is_empty()) {
            None => Ok(cases.iter().collect()),
            Some(test) => cases
                .iter()
                .find(|case| case.name() == test)
                .map(|case| vec![case])
                .ok_or_else(|| SuiteError::UnknownTest {
                    suite: suite.to_string(),
                    test: test.to_string(),
                }),
        }
    }

    /// Execute `cases` sequentially as a run of `suite`, logging under the suite name.
    pub fn run_tests<'a>(
        &self,
        cases: impl IntoIterator<Item = &'a TestCase>,
        suite: &str,
    ) -> RunSummary {
        let mut session = self.sink.open(suite);
        println!("[RUNNING SUITE] {}", suite);

        let summary = run_cases(suite, cases, session.as_mut());

        println!(
            "[SUITE] {} - Passed: {}, Failed: {}",
            suite, summary.passed, summary.failed
        );
        summary
    }

    /// Run every suite concurrently and wait for all of them.
    ///
    /// Summaries come back in suite-name order regardless of completion order.
    pub fn run_all_suites(&self) -> Result<Vec<RunSummary>, SuiteError> {
        if self.suites.is_empty() {
            return Ok(Vec::new());
        }

        let threads = self
            .jobs
            .unwrap_or(self.suites.len())
            .clamp(1, self.suites.len());
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("minitest-suite-{}", i))
            .build()?;

        tracing::debug!(suites = self.suites.len(), threads, "running all suites");

        let names = self.list_suites();
        pool.install(|| {
            names
                .par_iter()
                .with_max_len(1)
                .map(|name| self.run_suite(name, None))
                .collect()
        })
    }
}

impl Default for SuiteRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NullSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Failure;
    use minitest_report::MemorySink;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn math_suites() -> SuiteRegistry {
        let mut registry = SuiteRegistry::default();
        registry
            .register("MathTests", "TestSuiteAddition", || {
                check_eq!(2 + 3, 5);
                Ok(())
            })
            .register("MathTests", "TestMultiplication", || {
                check_eq!(4 * 2, 8);
                Ok(())
            })
            .register("StringTests", "TestStringLength", || {
                check_eq!("hello".len(), 5);
                Ok(())
            });
        registry
    }

    #[test]
    fn test_run_suite_in_order() {
        let summary = math_suites().run_suite("MathTests", None).unwrap();
        assert_eq!(summary.category, "MathTests");
        assert_eq!(
            summary.names(),
            vec!["TestSuiteAddition", "TestMultiplication"]
        );
        assert_eq!(summary.passed, 2);
    }

    #[test]
    fn test_run_suite_with_filter() {
        let registry = math_suites();
        let summary = registry
            .run_suite("MathTests", Some("TestMultiplication"))
            .unwrap();
        assert_eq!(summary.names(), vec!["TestMultiplication"]);

        let whole = registry.run_suite("MathTests", Some("")).unwrap();
        assert_eq!(whole.total, 2);
    }

    #[test]
    fn test_unknown_suite_and_test() {
        let registry = math_suites();
        assert!(matches!(
            registry.run_suite("Nope", None),
            Err(SuiteError::UnknownSuite(name)) if name == "Nope"
        ));
        assert!(matches!(
            registry.run_suite("MathTests", Some("Missing")),
            Err(SuiteError::UnknownTest { .. })
        ));
    }

    #[test]
    fn test_setup_teardown_bracket() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SuiteRegistry::default();

        for (name, pass) in [("one", true), ("two", false), ("three", false)] {
            let events = Arc::clone(&events);
            registry.register("Bracketed", name, move || {
                events.lock().unwrap().push(name.to_string());
                if pass {
                    Ok(())
                } else {
                    Err(Failure::assertion("expected"))
                }
            });
        }
        let setup_events = Arc::clone(&events);
        registry.on_setup("Bracketed", move || {
            setup_events.lock().unwrap().push("setup".to_string())
        });
        let teardown_events = Arc::clone(&events);
        registry.on_teardown("Bracketed", move || {
            teardown_events.lock().unwrap().push("teardown".to_string())
        });

        let summary = registry.run_suite("Bracketed", None).unwrap();
        assert_eq!(summary.failed, 2);
        assert_eq!(
            *events.lock().unwrap(),
            vec!["setup", "one", "two", "three", "teardown"]
        );
    }

    #[test]
    fn test_later_hook_replaces_earlier() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut registry = math_suites();

        let counter = Arc::clone(&first);
        registry.on_setup("MathTests", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        registry.on_setup("MathTests", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        registry.run_suite("MathTests", None).unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    fn counting_hook(calls: &Arc<AtomicUsize>) -> impl Fn() + Send + Sync + 'static {
        let counter = Arc::clone(calls);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_hooks_skipped_for_unknown_test() {
        let setups = Arc::new(AtomicUsize::new(0));
        let teardowns = Arc::new(AtomicUsize::new(0));
        let mut registry = math_suites();
        registry.on_setup("MathTests", counting_hook(&setups));
        registry.on_teardown("MathTests", counting_hook(&teardowns));

        assert!(registry.run_suite("MathTests", Some("Missing")).is_err());
        assert_eq!(setups.load(Ordering::SeqCst), 0);
        assert_eq!(teardowns.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_hooks_skipped_for_unknown_suite() {
        let setups = Arc::new(AtomicUsize::new(0));
        let teardowns = Arc::new(AtomicUsize::new(0));
        let mut registry = math_suites();
        // Hooks on their own do not create a suite
        registry.on_setup("Orphan", counting_hook(&setups));
        registry.on_teardown("Orphan", counting_hook(&teardowns));

        assert!(matches!(
            registry.run_suite("Orphan", None),
            Err(SuiteError::UnknownSuite(name)) if name == "Orphan"
        ));
        assert_eq!(setups.load(Ordering::SeqCst), 0);
        assert_eq!(teardowns.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_list_suites() {
        let registry = math_suites();
        assert_eq!(registry.list_suites(), vec!["MathTests", "StringTests"]);
        assert_eq!(
            registry.case_names("StringTests"),
            Some(vec!["TestStringLength"])
        );
        assert_eq!(registry.case_names("Nope"), None);
    }

    #[test]
    fn test_run_all_suites_runs_concurrently() {
        // Both suites block until the other has started; this only
        // completes if they run on separate threads.
        let started = Arc::new(AtomicUsize::new(0));
        let mut registry = SuiteRegistry::default();
        for suite in ["Left", "Right"] {
            let started = Arc::clone(&started);
            registry.register(suite, "WaitForPeer", move || {
                started.fetch_add(1, Ordering::SeqCst);
                for _ in 0..500 {
                    if started.load(Ordering::SeqCst) >= 2 {
                        return Ok(());
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(Failure::assertion("peer suite never started"))
            });
        }

        let summaries = registry.run_all_suites().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].category, "Left");
        assert_eq!(summaries[1].category, "Right");
        assert!(summaries.iter().all(RunSummary::all_passed));
    }

    #[test]
    fn test_run_all_suites_logs_per_suite() {
        let sink = MemorySink::new();
        let mut registry = math_suites();
        registry.set_sink(Arc::new(sink.clone()));
        registry.set_jobs(Some(1));

        let summaries = registry.run_all_suites().unwrap();
        assert_eq!(summaries.iter().map(|s| s.total).sum::<usize>(), 3);

        let lines = sink.lines();
        assert!(lines.contains(&"[LOG START] Suite: MathTests".to_string()));
        assert!(lines.contains(&"[LOG START] Suite: StringTests".to_string()));
        assert!(lines.contains(&"[TEST] TestStringLength - PASS".to_string()));
    }

    #[test]
    fn test_run_all_suites_empty() {
        assert!(SuiteRegistry::default().run_all_suites().unwrap().is_empty());
    }
}
