//! Logging Sink
//!
//! Append-only text records, one session per run category or suite.
//!
//! File layout written by [`FileSink`]:
//! ```text
//! [LOG START] Suite: MathTests
//! [TEST START] 20250318_142501
//! [TEST] TestSuiteAddition - PASS
//! [ERROR] TestBroken - 1 + 1 != 3 (2 != 3) at tests/math.rs:12
//! [TEST] TestBroken - FAIL
//! [LOG END] 20250318_142501
//! ```

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Severity prefix for free-form log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// `[INFO]`
    Info,
    /// `[WARNING]`
    Warning,
    /// `[ERROR]`
    Error,
}

impl LogLevel {
    /// Line prefix written before the message
    pub fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO] ",
            LogLevel::Warning => "[WARNING] ",
            LogLevel::Error => "[ERROR] ",
        }
    }
}

/// Factory for log sessions; shared by every registry of a harness.
pub trait LogSink: Send + Sync {
    /// Open a new session for a run category (e.g. `AllTests`) or suite name.
    fn open(&self, category: &str) -> Box<dyn LogSession>;
}

/// One open log stream. Dropping the session closes it.
pub trait LogSession: Send {
    /// Record `[TEST] <name> - PASS|FAIL`
    fn log_result(&mut self, name: &str, passed: bool);

    /// Record `<level prefix><message>`
    fn log_message(&mut self, message: &str, level: LogLevel);
}

fn result_line(name: &str, passed: bool) -> String {
    format!("[TEST] {} - {}", name, if passed { "PASS" } else { "FAIL" })
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Keep categories usable as file name fragments (`Prefix_a/b` -> `Prefix_a_b`).
fn sanitize_category(category: &str) -> String {
    category
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ─── FileSink ────────────────────────────────────────────────────────────────

/// Writes one log file per session under a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
    enabled: bool,
}

impl FileSink {
    /// Sink writing into `directory` (created on first session)
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            enabled: true,
        }
    }

    /// Enable or disable file creation entirely
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Target directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new("Logs")
    }
}

impl LogSink for FileSink {
    fn open(&self, category: &str) -> Box<dyn LogSession> {
        if !self.enabled {
            return Box::new(NullSession);
        }
        Box::new(FileSession::open(&self.directory, category))
    }
}

struct FileSession {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl FileSession {
    fn open(directory: &Path, category: &str) -> Self {
        let started = timestamp();
        let path = directory.join(format!(
            "test_log_{}_{}.log",
            sanitize_category(category),
            started
        ));

        // Sessions of the same category opened within one second share a file;
        // append so neither clobbers the other.
        let opened = fs::create_dir_all(directory).and_then(|_| {
            File::options()
                .create(true)
                .append(true)
                .open(&path)
        });

        let mut session = match opened {
            Ok(file) => Self {
                writer: Some(BufWriter::new(file)),
                path,
            },
            Err(e) => {
                eprintln!(
                    "[LOG ERROR] Failed to open log file: {} ({})",
                    path.display(),
                    e
                );
                Self { writer: None, path }
            }
        };

        session.write_line(&format!("[LOG START] Suite: {}", category));
        session.write_line(&format!("[TEST START] {}", started));
        tracing::debug!(path = %session.path.display(), "opened log session");
        session
    }

    fn write_line(&mut self, line: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let written = writeln!(writer, "{}", line).and_then(|_| writer.flush());
        if let Err(e) = written {
            eprintln!(
                "[LOG ERROR] Failed to write log {}: {} ({})",
                self.path.display(),
                line,
                e
            );
            self.writer = None;
        }
    }
}

impl LogSession for FileSession {
    fn log_result(&mut self, name: &str, passed: bool) {
        self.write_line(&result_line(name, passed));
    }

    fn log_message(&mut self, message: &str, level: LogLevel) {
        self.write_line(&format!("{}{}", level.prefix(), message));
    }
}

impl Drop for FileSession {
    fn drop(&mut self) {
        self.write_line(&format!("[LOG END] {}", timestamp()));
    }
}

// ─── MemorySink ──────────────────────────────────────────────────────────────

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far, across all sessions
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn open(&self, category: &str) -> Box<dyn LogSession> {
        let mut session = MemorySession {
            lines: Arc::clone(&self.lines),
        };
        session.push(format!("[LOG START] Suite: {}", category));
        Box::new(session)
    }
}

struct MemorySession {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySession {
    fn push(&mut self, line: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

impl LogSession for MemorySession {
    fn log_result(&mut self, name: &str, passed: bool) {
        self.push(result_line(name, passed));
    }

    fn log_message(&mut self, message: &str, level: LogLevel) {
        self.push(format!("{}{}", level.prefix(), message));
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.push("[LOG END]".to_string());
    }
}

// ─── NullSink ────────────────────────────────────────────────────────────────

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn open(&self, _category: &str) -> Box<dyn LogSession> {
        Box::new(NullSession)
    }
}

struct NullSession;

impl LogSession for NullSession {
    fn log_result(&mut self, _name: &str, _passed: bool) {}

    fn log_message(&mut self, _message: &str, _level: LogLevel) {}
}
