//! Failure Signaling
//!
//! Test bodies return [`TestResult`]. The assertion macros produce
//! `FailureKind::Assertion`; a panic escaping a body is converted at the
//! containment boundary into `FailureKind::Foreign`.

use minitest_report::CaseStatus;
use std::any::Any;

/// Why a case failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Raised by an assertion macro or `Failure::assertion`
    Assertion,
    /// Anything else that escaped the body
    Foreign,
}

/// A failed test case, with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
}

/// Result of one test body
pub type TestResult = Result<(), Failure>;

impl Failure {
    /// Assertion failure with a message
    pub fn assertion(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Assertion,
            message: message.into(),
        }
    }

    /// Unexpected failure with a message
    pub fn foreign(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Foreign,
            message: message.into(),
        }
    }

    /// Classify a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(s) = payload.downcast_ref::<&str>() {
            Some(s.to_string())
        } else {
            payload.downcast_ref::<String>().cloned()
        };

        match detail {
            Some(detail) => Self::foreign(format!("unexpected failure: {}", detail)),
            None => Self::foreign("unexpected failure"),
        }
    }

    /// Failure classification
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Human-readable reason
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Report status for this failure
    pub fn status(&self) -> CaseStatus {
        match self.kind {
            FailureKind::Assertion => CaseStatus::Failed,
            FailureKind::Foreign => CaseStatus::Crashed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_panic() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        let failure = Failure::from_panic(payload);
        assert_eq!(failure.kind(), FailureKind::Foreign);
        assert_eq!(failure.message(), "unexpected failure: boom");
        assert_eq!(failure.status(), CaseStatus::Crashed);
    }

    #[test]
    fn test_from_formatted_panic() {
        let n = 3;
        let payload = std::panic::catch_unwind(|| panic!("bad {}", n)).unwrap_err();
        assert_eq!(
            Failure::from_panic(payload).message(),
            "unexpected failure: bad 3"
        );
    }

    #[test]
    fn test_from_opaque_panic() {
        let payload = std::panic::catch_unwind(|| std::panic::panic_any(7_u32)).unwrap_err();
        assert_eq!(Failure::from_panic(payload).message(), "unexpected failure");
    }

    #[test]
    fn test_assertion_display() {
        let failure = Failure::assertion("x is false");
        assert_eq!(failure.to_string(), "x is false");
        assert_eq!(failure.status(), CaseStatus::Failed);
    }
}
