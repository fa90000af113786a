//! Human-readable Report
//!
//! End-of-invocation recap. Per-case progress lines are printed live by the
//! runners; this only summarizes.

use crate::report::{CaseStatus, Report};

/// Format a report for terminal display
pub fn format_human_report(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("minitest Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for run in &report.runs {
        output.push_str(&format!(
            "{:<32} total: {:>4}  passed: {:>4}  failed: {:>4}\n",
            run.category, run.total, run.passed, run.failed
        ));
        for case in run.cases.iter().filter(|c| !c.status.is_pass()) {
            let icon = match case.status {
                CaseStatus::Failed => "✗",
                CaseStatus::Crashed => "💥",
                CaseStatus::Passed => "✓",
            };
            output.push_str(&format!(
                "  {} {} - {}\n",
                icon,
                case.name,
                case.message.as_deref().unwrap_or("")
            ));
        }
    }

    if !report.benchmarks.is_empty() {
        output.push('\n');
        output.push_str("Benchmarks\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for bench in &report.benchmarks {
            output.push_str(&format!(
                "  {:<40} {:>12.6} ms  ({} iterations)\n",
                bench.name, bench.mean_ms, bench.iterations
            ));
        }
    }

    if !report.errors.is_empty() {
        output.push('\n');
        for error in &report.errors {
            output.push_str(&format!("[ERROR] {}\n", error));
        }
    }

    let summary = &report.summary;
    output.push('\n');
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Total: {}, Passed: {}, Failed: {}, Benchmarks: {}\n",
        summary.total, summary.passed, summary.failed, summary.benchmarks
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CaseRecord, RunSummary};

    #[test]
    fn test_human_report_lists_failures_only() {
        let mut report = Report::new("0.1.0");
        let mut run = RunSummary::new("AllTests");
        run.record(CaseRecord::passed("TestBoolean", 1));
        run.record(CaseRecord::failed(
            "TestFailure",
            CaseStatus::Failed,
            "false is false",
            1,
        ));
        report.push_run(run);

        let text = format_human_report(&report);
        assert!(text.contains("✗ TestFailure - false is false"));
        assert!(!text.contains("TestBoolean"));
        assert!(text.contains("Total: 2, Passed: 1, Failed: 1, Benchmarks: 0"));
    }
}
