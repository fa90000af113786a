#![warn(missing_docs)]
//! minitest CLI Library
//!
//! Integrator surface for test binaries: build a [`Harness`], register tests,
//! then hand it to [`run`] from `main`. The command line selects which run
//! operations execute; without flags everything runs.
//!
//! # Example
//!
//! ```ignore
//! use minitest_cli::Harness;
//! use std::process::ExitCode;
//!
//! fn main() -> ExitCode {
//!     let mut harness = Harness::new();
//!     harness.test("TestBoolean", || Ok(()));
//!     match minitest_cli::run(harness) {
//!         Ok(outcome) => ExitCode::from(outcome.exit_code()),
//!         Err(e) => {
//!             eprintln!("{:#}", e);
//!             ExitCode::FAILURE
//!         }
//!     }
//! }
//! ```

mod config;
mod harness;
mod planner;

pub use config::*;
pub use harness::Harness;
pub use planner::{ExecutionPlan, Step, build_plan};

use clap::Parser;
use minitest_report::{
    FileSink, OutputFormat, Report, format_human_report, generate_json_report,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// minitest CLI arguments
#[derive(Parser, Debug)]
#[command(name = "minitest")]
#[command(author, version, about = "minitest - unit tests and micro-benchmarks")]
pub struct Cli {
    /// Run flat tests whose name starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Run the flat test with exactly this name
    #[arg(long)]
    pub exact: Option<String>,

    /// Run the DISABLED_ tests
    #[arg(long)]
    pub disabled: bool,

    /// Run all parameterized tests
    #[arg(long)]
    pub params: bool,

    /// Run one suite
    #[arg(long)]
    pub suite: Option<String>,

    /// Run only this test of the suite given with --suite
    #[arg(long, requires = "suite")]
    pub test: Option<String>,

    /// Run all suites concurrently
    #[arg(long)]
    pub suites: bool,

    /// Run all benchmarks
    #[arg(long)]
    pub bench: bool,

    /// Run one benchmark by name
    #[arg(long)]
    pub bench_name: Option<String>,

    /// List registered tests, suites, parameterized cases and benchmarks
    #[arg(long)]
    pub list: bool,

    /// Report format: human, json (default from minitest.toml, else human)
    #[arg(long)]
    pub format: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Do not write log files
    #[arg(long)]
    pub no_log: bool,

    /// Worker threads when running all suites
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Result of one harness invocation
#[derive(Debug)]
pub struct RunOutcome {
    /// Aggregate of every executed run operation
    pub report: Report,
}

impl RunOutcome {
    /// `1` when any executed case failed or a lookup failed, else `0`
    pub fn exit_code(&self) -> u8 {
        if self.report.has_failures() { 1 } else { 0 }
    }
}

/// Run the harness with the process arguments.
/// This is the main entry point for test binaries.
pub fn run(harness: Harness) -> anyhow::Result<RunOutcome> {
    let cli = Cli::parse();
    run_with_cli(cli, harness)
}

/// Run the harness with pre-parsed arguments.
///
/// Configuration comes from the nearest `minitest.toml`, if any.
pub fn run_with_cli(cli: Cli, harness: Harness) -> anyhow::Result<RunOutcome> {
    let config = MiniConfig::discover().unwrap_or_default();
    run_with_config(cli, config, harness)
}

/// Run the harness with pre-parsed arguments and an explicit configuration.
///
/// Command-line flags override `config`.
pub fn run_with_config(
    cli: Cli,
    config: MiniConfig,
    mut harness: Harness,
) -> anyhow::Result<RunOutcome> {
    init_tracing(cli.verbose);

    let format_name = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_name.parse().unwrap_or_else(|e| {
        tracing::warn!("{}, using human output", e);
        OutputFormat::Human
    });

    if !harness.has_custom_sink() {
        let directory = cli
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.logging.directory));
        let enabled = config.logging.enabled && !cli.no_log;
        harness.set_sink(Arc::new(FileSink::new(directory).enabled(enabled)));
    }
    harness.set_jobs(cli.jobs.or(config.runner.jobs));

    if cli.list {
        print!("{}", format_listing(&harness));
        return Ok(RunOutcome {
            report: Report::new(env!("CARGO_PKG_VERSION")),
        });
    }

    let plan = build_plan(&cli, &config);
    tracing::debug!(steps = plan.steps.len(), "execution plan built");
    let report = execute_plan(&harness, &plan)?;

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_report(&report),
    };

    let output_path = cli
        .output
        .clone()
        .or_else(|| config.output.file.as_ref().map(PathBuf::from));
    if let Some(path) = output_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(&path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(RunOutcome { report })
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "minitest=debug"
    } else {
        "minitest=info"
    };
    // A subscriber may already be installed by an earlier run in this process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute every step of `plan` against `harness`, in order.
///
/// Lookup failures are recorded in the report and execution continues.
pub fn execute_plan(harness: &Harness, plan: &ExecutionPlan) -> anyhow::Result<Report> {
    let mut report = Report::new(env!("CARGO_PKG_VERSION"));

    for step in &plan.steps {
        tracing::debug!(?step, "running step");
        match step {
            Step::AllTests => report.push_run(harness.tests().run_all()),
            Step::Prefix(prefix) => report.push_run(harness.tests().run_by_prefix(prefix)),
            Step::Single(name) => report.push_run(harness.tests().run_single(name)),
            Step::Disabled => report.push_run(harness.tests().run_disabled()),
            Step::Params => report.push_run(harness.params_registry().run_all()),
            Step::AllBenchmarks => report.push_benchmarks(harness.benchmarks().run_all()),
            Step::Benchmark(name) => match harness.benchmarks().run(name) {
                Some(record) => report.push_benchmarks([record]),
                None => {
                    let message = format!("Benchmark '{}' not found.", name);
                    eprintln!("[ERROR] {}", message);
                    report.push_error(message);
                }
            },
            Step::Suite { name, test } => {
                match harness.suites().run_suite(name, test.as_deref()) {
                    Ok(summary) => report.push_run(summary),
                    Err(e) => report.push_error(e.to_string()),
                }
            }
            Step::AllSuites => {
                for summary in harness.suites().run_all_suites()? {
                    report.push_run(summary);
                }
            }
        }
    }

    Ok(report)
}

/// Render the names of everything registered in `harness`
pub fn format_listing(harness: &Harness) -> String {
    let mut output = String::from("minitest Plan:\n");

    output.push_str("├── tests\n");
    for name in harness.tests().names() {
        output.push_str(&format!("│   ├── {}\n", name));
    }

    output.push_str("├── suites\n");
    for suite in harness.suites().list_suites() {
        output.push_str(&format!("│   ├── {}\n", suite));
        for name in harness.suites().case_names(suite).unwrap_or_default() {
            output.push_str(&format!("│   │   ├── {}\n", name));
        }
    }

    output.push_str("├── params\n");
    for name in harness.params_registry().names() {
        output.push_str(&format!("│   ├── {}\n", name));
    }

    output.push_str("└── benchmarks\n");
    for name in harness.benchmarks().names() {
        output.push_str(&format!("    ├── {}\n", name));
    }

    output.push_str(&format!(
        "{} tests, {} suites, {} parameterized cases, {} benchmarks found.\n",
        harness.tests().len(),
        harness.suites().len(),
        harness.params_registry().len(),
        harness.benchmarks().len()
    ));
    output
}
