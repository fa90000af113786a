#![warn(missing_docs)]
//! minitest Report - Result Logging and Run Reports
//!
//! Everything the harness writes down about a run lives here:
//! - `LogSink` / `LogSession`: the persisted per-category log stream
//!   (`FileSink` for `Logs/test_log_<category>_<timestamp>.log`, plus
//!   in-memory and no-op sinks)
//! - `RunSummary` / `CaseRecord` / `BenchmarkRecord`: what a run operation returns
//! - `Report`: the aggregate of a whole harness invocation, rendered as
//!   JSON or as a human-readable summary

mod human;
mod json;
mod report;
mod sink;

pub use human::format_human_report;
pub use json::generate_json_report;
pub use report::{
    BenchmarkRecord, CaseRecord, CaseStatus, Report, ReportMeta, ReportSummary, RunSummary,
};
pub use sink::{FileSink, LogLevel, LogSession, LogSink, MemorySink, NullSink};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    #[default]
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
