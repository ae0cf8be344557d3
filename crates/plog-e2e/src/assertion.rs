//! Hard and soft assertions for scenario checks.
//!
//! Hard assertions return [`E2eError::AssertionFailed`] and stop the scenario
//! at the first mismatch. Soft assertions ([`SoftAssertions`]) keep going and
//! report every mismatch together when the scenario finishes.

mod soft;

pub use soft::{AssertionFailure, AssertionSummary, SoftAssertionError, SoftAssertions};

use crate::result::{E2eError, E2eResult};
use std::fmt::Debug;

/// Fail the scenario unless `actual == expected`
pub fn ensure_eq<T: PartialEq + Debug + ?Sized>(
    actual: &T,
    expected: &T,
    context: &str,
) -> E2eResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(E2eError::assertion(format!(
            "{context}: expected {expected:?}, got {actual:?}"
        )))
    }
}
