//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome classification of one executed case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Body completed
    Passed,
    /// Body signaled an assertion failure
    Failed,
    /// Body failed in an unexpected way (escaped panic)
    Crashed,
}

impl CaseStatus {
    /// Whether this status counts towards `passed`
    pub fn is_pass(self) -> bool {
        matches!(self, CaseStatus::Passed)
    }
}

/// One executed case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case name
    pub name: String,
    /// Outcome classification
    pub status: CaseStatus,
    /// Failure reason, absent when passed
    pub message: Option<String>,
    /// Wall-clock time of the body
    pub duration_ns: u64,
}

impl CaseRecord {
    /// Record for a passing case
    pub fn passed(name: impl Into<String>, duration_ns: u64) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Passed,
            message: None,
            duration_ns,
        }
    }

    /// Record for a failing case
    pub fn failed(
        name: impl Into<String>,
        status: CaseStatus,
        message: impl Into<String>,
        duration_ns: u64,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            message: Some(message.into()),
            duration_ns,
        }
    }
}

/// Aggregate returned by every batch-executing run operation.
///
/// `passed + failed == total` holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run category or suite name (also the log session category)
    pub category: String,
    /// Executed cases
    pub total: usize,
    /// Cases that passed
    pub passed: usize,
    /// Cases that failed or crashed
    pub failed: usize,
    /// Per-case records in execution order
    pub cases: Vec<CaseRecord>,
}

impl RunSummary {
    /// Empty summary for a category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            total: 0,
            passed: 0,
            failed: 0,
            cases: Vec::new(),
        }
    }

    /// Account one executed case
    pub fn record(&mut self, case: CaseRecord) {
        self.total += 1;
        if case.status.is_pass() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.cases.push(case);
    }

    /// Names of the executed cases, in execution order
    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether every executed case passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Mean timing of one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark name
    pub name: String,
    /// Timed iterations
    pub iterations: u32,
    /// Arithmetic mean of per-iteration wall-clock time, in milliseconds
    pub mean_ms: f64,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report layout version
    pub schema_version: u32,
    /// minitest version
    pub version: String,
    /// When the report was created
    pub timestamp: DateTime<Utc>,
}

/// Totals across every run of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Executed cases across all runs
    pub total: usize,
    /// Passed cases across all runs
    pub passed: usize,
    /// Failed cases across all runs
    pub failed: usize,
    /// Benchmarks measured
    pub benchmarks: usize,
    /// Run operations aborted by a registry lookup failure
    pub lookup_errors: usize,
}

/// Complete report of one harness invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report metadata
    pub meta: ReportMeta,
    /// Every run summary in execution order
    pub runs: Vec<RunSummary>,
    /// Benchmark means in execution order
    pub benchmarks: Vec<BenchmarkRecord>,
    /// Lookup failures
    pub errors: Vec<String>,
    /// Totals
    pub summary: ReportSummary,
}

impl Report {
    /// Empty report stamped with the current time
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            meta: ReportMeta {
                schema_version: 1,
                version: version.into(),
                timestamp: Utc::now(),
            },
            runs: Vec::new(),
            benchmarks: Vec::new(),
            errors: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Append a run summary and fold it into the totals
    pub fn push_run(&mut self, run: RunSummary) {
        self.summary.total += run.total;
        self.summary.passed += run.passed;
        self.summary.failed += run.failed;
        self.runs.push(run);
    }

    /// Append benchmark results
    pub fn push_benchmarks(&mut self, records: impl IntoIterator<Item = BenchmarkRecord>) {
        for record in records {
            self.summary.benchmarks += 1;
            self.benchmarks.push(record);
        }
    }

    /// Record a run operation that could not start
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.summary.lookup_errors += 1;
        self.errors.push(message.into());
    }

    /// Whether anything in this report should fail the process
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0 || self.summary.lookup_errors > 0
    }
}
