//! Benchmark Registry and Runner
//!
//! A flat, name-keyed mapping of timed callables. Each run executes the
//! selected callables `iterations` times back-to-back and reports the mean:
//!
//! ```text
//! [BENCHMARK] Running BenchmarkSort for 5 iterations...
//! [BENCHMARK] BenchmarkSort Avg Time: 0.012345 ms
//! ```
//!
//! Panics raised by a benchmarked callable are not caught; they propagate to
//! the caller of the run operation.

use crate::measure::mean_millis;
use minitest_core::Apply;
use minitest_report::{BenchmarkRecord, LogLevel, LogSession, LogSink, NullSink};
use std::collections::BTreeMap;
use std::hint::black_box;
use std::sync::Arc;

/// Shared zero-argument benchmark body
pub type BenchFn = Arc<dyn Fn() + Send + Sync>;

/// A named timed callable with its iteration count
#[derive(Clone)]
pub struct BenchmarkCase {
    name: String,
    action: BenchFn,
    iterations: u32,
}

impl BenchmarkCase {
    /// Build a case; `iterations` is clamped to at least one.
    pub fn new<F>(name: impl Into<String>, action: F, iterations: u32) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            action: Arc::new(action),
            iterations: iterations.max(1),
        }
    }

    /// Case name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of timed iterations per run
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Time the case and print the progress lines
    pub fn measure(&self) -> BenchmarkRecord {
        measure_named(&self.name, self.iterations, || (self.action)())
    }
}

impl std::fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .field("iterations", &self.iterations)
            .finish()
    }
}

fn measure_named<F: FnMut()>(name: &str, iterations: u32, action: F) -> BenchmarkRecord {
    let iterations = iterations.max(1);
    println!(
        "[BENCHMARK] Running {} for {} iterations...",
        name, iterations
    );
    let mean_ms = mean_millis(iterations, action);
    println!("[BENCHMARK] {}", avg_line(name, mean_ms));

    tracing::debug!(benchmark = name, iterations, mean_ms, "benchmark finished");
    BenchmarkRecord {
        name: name.to_string(),
        iterations,
        mean_ms,
    }
}

fn avg_line(name: &str, mean_ms: f64) -> String {
    format!("{} Avg Time: {:.6} ms", name, mean_ms)
}

/// Name-keyed benchmark registry
pub struct BenchmarkRegistry {
    cases: BTreeMap<String, BenchmarkCase>,
    sink: Arc<dyn LogSink>,
}

impl BenchmarkRegistry {
    /// Empty registry logging into `sink`
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            cases: BTreeMap::new(),
            sink,
        }
    }

    /// Replace the log sink
    pub fn set_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.sink = sink;
    }

    /// Store a benchmark. Re-registering a name replaces the earlier entry.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F, iterations: u32) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register_case(BenchmarkCase::new(name, action, iterations))
    }

    /// Store a benchmark that calls `func` with a fixed argument tuple.
    pub fn register_with<Args, F>(
        &mut self,
        name: impl Into<String>,
        func: F,
        iterations: u32,
        args: Args,
    ) -> &mut Self
    where
        Args: Send + Sync + 'static,
        F: Apply<Args> + Send + Sync + 'static,
    {
        self.register(
            name,
            move || {
                black_box(Apply::apply(&func, &args));
            },
            iterations,
        )
    }

    /// Store a prebuilt case
    pub fn register_case(&mut self, case: BenchmarkCase) -> &mut Self {
        if self.cases.contains_key(case.name()) {
            tracing::debug!(name = case.name(), "benchmark replaced");
        }
        self.cases.insert(case.name.clone(), case);
        self
    }

    /// Number of registered benchmarks
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no benchmark is registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Benchmark names in run order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.keys().map(String::as_str)
    }

    /// Run every benchmark in name order
    pub fn run_all(&self) -> Vec<BenchmarkRecord> {
        let mut session = self.sink.open("AllBenchmarks");
        self.cases
            .values()
            .map(|case| Self::run_logged(case, session.as_mut()))
            .collect()
    }

    /// Run the benchmark named `name`, if registered
    ///
    /// No log session is opened for an unknown name.
    pub fn run(&self, name: &str) -> Option<BenchmarkRecord> {
        let Some(case) = self.cases.get(name) else {
            tracing::warn!(name, "no benchmark registered under this name");
            return None;
        };
        let mut session = self.sink.open(&format!("Benchmark_{}", name));
        Some(Self::run_logged(case, session.as_mut()))
    }

    fn run_logged(case: &BenchmarkCase, session: &mut dyn LogSession) -> BenchmarkRecord {
        let record = case.measure();
        session.log_message(
            &format!("[BENCHMARK] {}", avg_line(&record.name, record.mean_ms)),
            LogLevel::Info,
        );
        record
    }
}

impl Default for BenchmarkRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NullSink))
    }
}

/// Time a zero-argument callable once, outside any registry.
pub fn bench_function<F, R>(name: &str, iterations: u32, func: F) -> BenchmarkRecord
where
    F: Fn() -> R,
{
    measure_named(name, iterations, || {
        black_box(func());
    })
}

/// Time `func` called with a fixed argument tuple, outside any registry.
pub fn bench_function_with<Args, F>(
    name: &str,
    iterations: u32,
    func: F,
    args: Args,
) -> BenchmarkRecord
where
    F: Apply<Args>,
{
    measure_named(name, iterations, || {
        black_box(Apply::apply(&func, &args));
    })
}
