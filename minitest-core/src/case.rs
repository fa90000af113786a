//! Test Cases and Fixtures

use crate::outcome::{Failure, TestResult};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::Arc;

/// Shared, thread-safe test body
pub type TestFn = Arc<dyn Fn() -> TestResult + Send + Sync>;

/// A named, zero-argument unit of verification.
///
/// Immutable once built; cloning shares the body.
#[derive(Clone)]
pub struct TestCase {
    name: String,
    action: TestFn,
}

impl TestCase {
    /// Build a case from a name and body
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> TestResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }

    /// Case name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the body inside the containment boundary.
    ///
    /// A panic escaping the body becomes a `Foreign` failure.
    pub fn run(&self) -> TestResult {
        match catch_unwind(AssertUnwindSafe(|| (self.action)())) {
            Ok(result) => result,
            Err(payload) => Err(Failure::from_panic(payload)),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Per-case state with set-up and tear-down steps.
///
/// A fresh fixture is built with `Default` for every run of the case.
pub trait Fixture: Default {
    /// Runs before the body
    fn set_up(&mut self) {}

    /// Runs after the body, whether it passed or not
    fn tear_down(&mut self) {}
}

/// Wrap a fixture body into a plain test body.
///
/// Prints `[SETUP]`/`[TEARDOWN]` markers around the body. A panicking body
/// still gets its tear-down before the panic continues to the runner.
pub fn fixture_case<X, B>(name: impl Into<String>, body: B) -> TestCase
where
    X: Fixture + 'static,
    B: Fn(&mut X) -> TestResult + Send + Sync + 'static,
{
    let name = name.into();
    let label = name.clone();
    TestCase::new(name, move || {
        let mut fixture = X::default();
        println!("[SETUP] {}", label);
        fixture.set_up();

        let outcome = catch_unwind(AssertUnwindSafe(|| body(&mut fixture)));

        println!("[TEARDOWN] {}", label);
        fixture.tear_down();

        match outcome {
            Ok(result) => result,
            Err(payload) => resume_unwind(payload),
        }
    })
}
