//! Shared Case Execution
//!
//! Every registry executes its cases through [`run_cases`], so PASS/FAIL
//! classification, console lines and log records are identical across flat
//! tests, suites and parameterized tests.
//!
//! ```text
//! [RUNNING] <name>          stdout
//! [PASS] <name>             stdout
//! [FAIL] <name> - <reason>  stderr
//! ```

use crate::case::TestCase;
use minitest_report::{CaseRecord, LogLevel, LogSession, RunSummary};
use std::io::Write;
use std::time::Instant;

fn flush_console() {
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
}

/// Execute one case, print its progress lines and log its result.
pub fn execute_case(case: &TestCase, session: &mut dyn LogSession) -> CaseRecord {
    let name = case.name();
    flush_console();
    println!("[RUNNING] {}", name);

    let start = Instant::now();
    let outcome = case.run();
    let duration_ns = start.elapsed().as_nanos() as u64;

    let record = match outcome {
        Ok(()) => {
            println!("[PASS] {}", name);
            session.log_result(name, true);
            CaseRecord::passed(name, duration_ns)
        }
        Err(failure) => {
            eprintln!("[FAIL] {} - {}", name, failure);
            session.log_message(&format!("{} - {}", name, failure), LogLevel::Error);
            session.log_result(name, false);
            CaseRecord::failed(name, failure.status(), failure.message(), duration_ns)
        }
    };

    flush_console();
    tracing::debug!(case = name, status = ?record.status, duration_ns, "case finished");
    record
}

/// Execute cases in order; a failing case never stops the batch.
pub fn run_cases<'a>(
    category: &str,
    cases: impl IntoIterator<Item = &'a TestCase>,
    session: &mut dyn LogSession,
) -> RunSummary {
    let mut summary = RunSummary::new(category);
    for case in cases {
        summary.record(execute_case(case, session));
    }
    summary
}

/// Print the framed `Total/Passed/Failed` line.
pub fn print_totals(summary: &RunSummary) {
    println!("===========================================");
    println!(
        "Total: {}, Passed: {}, Failed: {}",
        summary.total, summary.passed, summary.failed
    );
    println!("===========================================");
    flush_console();
}
