//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BenchmarkRecord, CaseRecord, RunSummary};

    #[test]
    fn test_json_contains_runs_and_benchmarks() {
        let mut report = Report::new("0.1.0");
        let mut run = RunSummary::new("AllTests");
        run.record(CaseRecord::passed("TestBoolean", 42));
        report.push_run(run);
        report.push_benchmarks([BenchmarkRecord {
            name: "TestLoopPerformance".to_string(),
            iterations: 10,
            mean_ms: 0.25,
        }]);

        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["runs"][0]["category"], "AllTests");
        assert_eq!(value["runs"][0]["cases"][0]["status"], "passed");
        assert_eq!(value["benchmarks"][0]["iterations"], 10);
        assert_eq!(value["summary"]["passed"], 1);
    }
}
