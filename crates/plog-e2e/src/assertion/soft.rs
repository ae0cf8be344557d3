//! Soft assertions
//!
//! Collect several assertion failures within one scenario without stopping
//! it, then report them together.

use crate::result::{E2eError, E2eResult, ErrorCategory};
use std::fmt::Debug;
use std::panic::Location;

/// A single assertion failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// Message describing the failure
    pub message: String,
    /// Source location of the assertion (`file:line`)
    pub location: Option<String>,
    /// Index of this failure in the sequence
    pub index: usize,
}

impl AssertionFailure {
    /// Create a new assertion failure
    #[must_use]
    pub fn new(message: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            location: None,
            index,
        }
    }

    /// Set the location of the failure
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Soft assertions collector
///
/// ```ignore
/// let mut soft = SoftAssertions::new();
/// soft.assert_eq(&msg, &"Authentication failed".to_string(), "login message");
/// soft.assert_false(token_present, "session token after failed login");
/// soft.verify()?;
/// ```
#[derive(Debug, Default)]
pub struct SoftAssertions {
    failures: Vec<AssertionFailure>,
    assertion_count: usize,
}

impl SoftAssertions {
    /// Create a new soft assertions collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert two values are equal
    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug + ?Sized>(
        &mut self,
        actual: &T,
        expected: &T,
        message: &str,
    ) {
        self.assertion_count += 1;
        if actual != expected {
            self.record_failure(
                format!("{message}: expected {expected:?}, got {actual:?}"),
                Location::caller(),
            );
        }
    }

    /// Assert a condition is true
    #[track_caller]
    pub fn assert_true(&mut self, condition: bool, message: &str) {
        self.assertion_count += 1;
        if !condition {
            self.record_failure(
                format!("{message}: expected true, got false"),
                Location::caller(),
            );
        }
    }

    /// Assert a condition is false
    #[track_caller]
    pub fn assert_false(&mut self, condition: bool, message: &str) {
        self.assertion_count += 1;
        if condition {
            self.record_failure(
                format!("{message}: expected false, got true"),
                Location::caller(),
            );
        }
    }

    /// Assert a value is None
    #[track_caller]
    pub fn assert_none<T: Debug>(&mut self, opt: &Option<T>, message: &str) {
        self.assertion_count += 1;
        if let Some(value) = opt {
            self.record_failure(
                format!("{message}: expected None, got Some({value:?})"),
                Location::caller(),
            );
        }
    }

    /// Record a custom failure
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.assertion_count += 1;
        self.record_failure(message.into(), Location::caller());
    }

    /// Absorb the outcome of a hard check.
    ///
    /// Assertion errors are recorded softly; any other error is returned so
    /// infrastructure failures still stop the scenario.
    #[track_caller]
    pub fn absorb(&mut self, result: E2eResult<()>) -> E2eResult<()> {
        let location = Location::caller();
        self.assertion_count += 1;
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.category() == ErrorCategory::Assertion => {
                self.record_failure(err.to_string(), location);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn record_failure(&mut self, message: String, location: &Location<'_>) {
        tracing::warn!(%message, "soft assertion failed");
        let failure = AssertionFailure::new(message, self.failures.len())
            .with_location(format!("{}:{}", location.file(), location.line()));
        self.failures.push(failure);
    }

    /// Get all failures
    #[must_use]
    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }

    /// Get the number of failures
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Get the total number of assertions checked
    #[must_use]
    pub const fn assertion_count(&self) -> usize {
        self.assertion_count
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Verify all assertions passed, returning an error if any failed
    pub fn verify(&self) -> Result<(), SoftAssertionError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(SoftAssertionError::new(&self.failures))
        }
    }

    /// Get a summary of the assertions
    #[must_use]
    pub fn summary(&self) -> AssertionSummary {
        AssertionSummary {
            total: self.assertion_count,
            passed: self.assertion_count - self.failures.len(),
            failed: self.failures.len(),
        }
    }
}

impl From<SoftAssertions> for E2eResult<()> {
    fn from(soft: SoftAssertions) -> Self {
        soft.verify().map_err(E2eError::from)
    }
}

/// Summary of assertion results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertionSummary {
    /// Total assertions checked
    pub total: usize,
    /// Assertions that passed
    pub passed: usize,
    /// Assertions that failed
    pub failed: usize,
}

/// Error type for soft assertion failures
#[derive(Debug, Clone)]
pub struct SoftAssertionError {
    /// All failure messages
    pub failures: Vec<String>,
    /// Number of failed assertions
    pub count: usize,
}

impl SoftAssertionError {
    /// Create a new error from failures
    #[must_use]
    pub fn new(failures: &[AssertionFailure]) -> Self {
        Self {
            failures: failures
                .iter()
                .map(|f| match &f.location {
                    Some(location) => format!("{} ({location})", f.message),
                    None => f.message.clone(),
                })
                .collect(),
            count: failures.len(),
        }
    }
}

impl std::fmt::Display for SoftAssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} assertion(s) failed:", self.count)?;
        for (i, failure) in self.failures.iter().enumerate() {
            writeln!(f, "  {}. {failure}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for SoftAssertionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty() {
        let soft = SoftAssertions::new();
        assert!(soft.all_passed());
        assert_eq!(soft.failure_count(), 0);
        assert_eq!(soft.assertion_count(), 0);
        assert!(soft.verify().is_ok());
    }

    #[test]
    fn test_assert_eq_collects_failures() {
        let mut soft = SoftAssertions::new();
        soft.assert_eq("Authentication failed", "Authentication failed", "first");
        soft.assert_eq("", "Authentication failed", "second");
        soft.assert_eq("x", "y", "third");
        assert_eq!(soft.assertion_count(), 3);
        assert_eq!(soft.failure_count(), 2);
        assert_eq!(soft.failures()[0].index, 0);
        assert_eq!(soft.failures()[1].index, 1);
        assert!(soft.failures()[0].message.starts_with("second"));
    }

    #[test]
    fn test_failure_records_caller_location() {
        let mut soft = SoftAssertions::new();
        soft.assert_true(false, "token present");
        let location = soft.failures()[0].location.clone().unwrap();
        assert!(location.contains("soft.rs"));
    }

    #[test]
    fn test_assert_none_reports_value() {
        let mut soft = SoftAssertions::new();
        soft.assert_none(&Some("abc"), "local storage token");
        assert!(soft.failures()[0].message.contains("Some(\"abc\")"));
    }

    #[test]
    fn test_absorb_records_assertions_only() {
        let mut soft = SoftAssertions::new();
        assert!(soft.absorb(Err(E2eError::assertion("wrong text"))).is_ok());
        assert_eq!(soft.failure_count(), 1);

        let result = soft.absorb(Err(E2eError::ElementNotFound {
            selector: "p".into(),
        }));
        assert!(matches!(result, Err(E2eError::ElementNotFound { .. })));
        assert_eq!(soft.failure_count(), 1);
    }

    #[test]
    fn test_summary() {
        let mut soft = SoftAssertions::new();
        soft.assert_true(true, "a");
        soft.assert_false(true, "b");
        soft.fail("c");
        assert_eq!(
            soft.summary(),
            AssertionSummary {
                total: 3,
                passed: 1,
                failed: 2
            }
        );
    }

    #[test]
    fn test_verify_error_display() {
        let mut soft = SoftAssertions::new();
        soft.fail("message was not blank");
        let err = soft.verify().unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("1 assertion(s) failed:"));
        assert!(text.contains("1. message was not blank"));
    }

    #[test]
    fn test_into_result() {
        let soft = SoftAssertions::new();
        let result: E2eResult<()> = soft.into();
        assert!(result.is_ok());

        let mut soft = SoftAssertions::new();
        soft.fail("boom");
        let result: E2eResult<()> = soft.into();
        assert!(matches!(result, Err(E2eError::SoftFailures(_))));
    }
}
