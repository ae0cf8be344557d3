//! Wait Mechanisms
//!
//! Synchronization for a single-page application whose DOM settles some time
//! after each navigation or form submission.
//!
//! ## Polling contract
//!
//! A wait is configured by a total `timeout`, a fixed `initial_delay` and a
//! number of `iterations`:
//!
//! - if `initial_delay >= timeout` the wait gives up at once, without
//!   evaluating the condition;
//! - otherwise it sleeps `initial_delay`, then evaluates the condition up to
//!   `iterations + 1` times with `(timeout - initial_delay) / iterations`
//!   between evaluations, stopping at the first success.
//!
//! Every wait returns a [`WaitResult`]. A timeout is an ordinary outcome;
//! callers that treat it as fatal use [`WaitResult::into_result`]. Errors
//! raised while evaluating a condition (other than a plain element miss)
//! abort the wait and are returned as `Err`.

use crate::driver::BrowserDriver;
use crate::result::{E2eError, E2eResult};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default total budget of a wait (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default delay before the first check (500ms)
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Default number of intervals after the initial delay
pub const DEFAULT_ITERATIONS: u32 = 10;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total budget
    pub timeout: Duration,
    /// Fixed delay before the first check
    pub initial_delay: Duration,
    /// Intervals between the first and the last check
    pub iterations: u32,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            initial_delay: DEFAULT_INITIAL_DELAY,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set total budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set initial delay
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set iteration count
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sleep between two consecutive checks
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.timeout.saturating_sub(self.initial_delay) / self.iterations.max(1)
    }

    /// Maximum number of condition evaluations
    #[must_use]
    pub const fn max_checks(&self) -> u32 {
        if self.initial_delay.as_nanos() >= self.timeout.as_nanos() {
            0
        } else {
            let iterations = if self.iterations == 0 { 1 } else { self.iterations };
            iterations.saturating_add(1)
        }
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition held
    Ready,
    /// The budget ran out first
    TimedOut,
}

/// Result of a wait operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitResult {
    /// How the wait ended
    pub outcome: WaitOutcome,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of condition evaluations
    pub checks: u32,
    /// Description of what was waited for
    pub waited_for: String,
}

impl WaitResult {
    /// Create a successful wait result
    #[must_use]
    pub fn ready(elapsed: Duration, checks: u32, waited_for: impl Into<String>) -> Self {
        Self {
            outcome: WaitOutcome::Ready,
            elapsed,
            checks,
            waited_for: waited_for.into(),
        }
    }

    /// Create a timeout wait result
    #[must_use]
    pub fn timed_out(elapsed: Duration, checks: u32, waited_for: impl Into<String>) -> Self {
        Self {
            outcome: WaitOutcome::TimedOut,
            elapsed,
            checks,
            waited_for: waited_for.into(),
        }
    }

    /// Whether the condition held
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.outcome == WaitOutcome::Ready
    }

    /// Turn a timeout into [`E2eError::Timeout`]
    pub fn into_result(self) -> E2eResult<Self> {
        match self.outcome {
            WaitOutcome::Ready => Ok(self),
            WaitOutcome::TimedOut => Err(E2eError::Timeout {
                ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
                waited_for: self.waited_for,
            }),
        }
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Evaluate `predicate` under the polling contract described in the module docs
pub async fn poll_until<F, Fut>(
    options: &WaitOptions,
    waited_for: &str,
    mut predicate: F,
) -> E2eResult<WaitResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<bool>>,
{
    let start = Instant::now();
    let max_checks = options.max_checks();
    if max_checks == 0 {
        tracing::debug!(waited_for, "wait budget spent by initial delay");
        return Ok(WaitResult::timed_out(start.elapsed(), 0, waited_for));
    }

    tokio::time::sleep(options.initial_delay).await;
    let interval = options.interval();

    for check in 1..=max_checks {
        if predicate().await? {
            let elapsed = start.elapsed();
            tracing::trace!(waited_for, check, ?elapsed, "wait ready");
            return Ok(WaitResult::ready(elapsed, check, waited_for));
        }
        if check < max_checks {
            tokio::time::sleep(interval).await;
        }
    }

    let elapsed = start.elapsed();
    tracing::debug!(waited_for, checks = max_checks, ?elapsed, "wait timed out");
    Ok(WaitResult::timed_out(elapsed, max_checks, waited_for))
}

// =============================================================================
// CONDITIONS
// =============================================================================

/// A condition evaluated against the browser
#[async_trait]
pub trait Condition: Send + Sync {
    /// Check if the condition is satisfied
    async fn check(&self, driver: &dyn BrowserDriver) -> E2eResult<bool>;

    /// Get description for logs and errors
    fn description(&self) -> String;
}

/// True once the selector matches nothing
#[derive(Debug, Clone)]
pub struct ElementVanishes(pub String);

#[async_trait]
impl Condition for ElementVanishes {
    async fn check(&self, driver: &dyn BrowserDriver) -> E2eResult<bool> {
        Ok(!driver.element_exists(&self.0).await?)
    }

    fn description(&self) -> String {
        format!("{} to vanish", self.0)
    }
}

/// True once the selector matches an element
#[derive(Debug, Clone)]
pub struct ElementAppears(pub String);

#[async_trait]
impl Condition for ElementAppears {
    async fn check(&self, driver: &dyn BrowserDriver) -> E2eResult<bool> {
        driver.element_exists(&self.0).await
    }

    fn description(&self) -> String {
        format!("{} to appear", self.0)
    }
}

/// True once the current URL equals one of the given URLs
#[derive(Debug, Clone)]
pub struct UrlIsOneOf(pub Vec<String>);

#[async_trait]
impl Condition for UrlIsOneOf {
    async fn check(&self, driver: &dyn BrowserDriver) -> E2eResult<bool> {
        let current = driver.current_url().await?;
        Ok(self.0.iter().any(|url| *url == current))
    }

    fn description(&self) -> String {
        format!("URL to be one of {:?}", self.0)
    }
}

/// True once `document.readyState` is `complete`
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentReady;

#[async_trait]
impl Condition for DocumentReady {
    async fn check(&self, driver: &dyn BrowserDriver) -> E2eResult<bool> {
        match driver.execute_js("return document.readyState;").await? {
            serde_json::Value::String(state) => Ok(state == "complete"),
            other => Err(E2eError::Script {
                message: format!("document.readyState returned {other}"),
            }),
        }
    }

    fn description(&self) -> String {
        "document to be ready".to_string()
    }
}

/// A function-based wait condition
pub struct FnCondition<F> {
    func: F,
    description: String,
}

impl<F> std::fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F, Fut> FnCondition<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = E2eResult<bool>> + Send,
{
    /// Create a new function condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

#[async_trait]
impl<F, Fut> Condition for FnCondition<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = E2eResult<bool>> + Send,
{
    async fn check(&self, _driver: &dyn BrowserDriver) -> E2eResult<bool> {
        (self.func)().await
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

// =============================================================================
// WAITER IMPLEMENTATION
// =============================================================================

/// Waiter for synchronization operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a new waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub const fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Options used by this waiter
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Wait for a condition
    pub async fn wait_for(
        &self,
        driver: &dyn BrowserDriver,
        condition: &dyn Condition,
    ) -> E2eResult<WaitResult> {
        let description = condition.description();
        poll_until(&self.options, &description, || condition.check(driver)).await
    }

    /// Wait for an element to disappear
    pub async fn wait_for_vanish(
        &self,
        driver: &dyn BrowserDriver,
        selector: &str,
    ) -> E2eResult<WaitResult> {
        self.wait_for(driver, &ElementVanishes(selector.to_string()))
            .await
    }

    /// Wait for an element to appear
    pub async fn wait_for_element(
        &self,
        driver: &dyn BrowserDriver,
        selector: &str,
    ) -> E2eResult<WaitResult> {
        self.wait_for(driver, &ElementAppears(selector.to_string()))
            .await
    }

    /// Wait for the current URL to match one of `urls`
    pub async fn wait_for_url(
        &self,
        driver: &dyn BrowserDriver,
        urls: &[String],
    ) -> E2eResult<WaitResult> {
        self.wait_for(driver, &UrlIsOneOf(urls.to_vec())).await
    }

    /// Wait for the document to finish loading
    pub async fn wait_for_document_ready(
        &self,
        driver: &dyn BrowserDriver,
    ) -> E2eResult<WaitResult> {
        self.wait_for(driver, &DocumentReady).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn options(timeout_ms: u64, initial_ms: u64, iterations: u32) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_initial_delay(Duration::from_millis(initial_ms))
            .with_iterations(iterations)
    }

    /// Paused-clock sleeps land on millisecond ticks
    fn assert_near(elapsed: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        assert!(
            elapsed >= expected && elapsed <= expected + Duration::from_millis(15),
            "elapsed {elapsed:?}, expected about {expected:?}"
        );
    }

    mod options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let options = WaitOptions::default();
            assert_eq!(options.timeout, Duration::from_secs(5));
            assert_eq!(options.initial_delay, Duration::from_millis(500));
            assert_eq!(options.iterations, 10);
        }

        #[test]
        fn test_interval_splits_remaining_budget() {
            assert_eq!(options(5000, 500, 10).interval(), Duration::from_millis(450));
            assert_eq!(options(2000, 1000, 4).interval(), Duration::from_millis(250));
        }

        #[test]
        fn test_max_checks() {
            assert_eq!(options(5000, 500, 10).max_checks(), 11);
            assert_eq!(options(500, 500, 10).max_checks(), 0);
            assert_eq!(options(100, 500, 10).max_checks(), 0);
        }

        #[test]
        fn test_zero_iterations_still_polls() {
            let options = options(1000, 0, 0);
            assert_eq!(options.interval(), Duration::from_millis(1000));
            assert_eq!(options.max_checks(), 2);
        }
    }

    mod wait_result_tests {
        use super::*;

        #[test]
        fn test_ready_into_result() {
            let result = WaitResult::ready(Duration::from_millis(900), 2, "login form");
            assert!(result.is_ready());
            assert_eq!(result.into_result().unwrap().checks, 2);
        }

        #[test]
        fn test_timed_out_into_result() {
            let result = WaitResult::timed_out(Duration::from_millis(5000), 11, "spinner");
            assert!(!result.is_ready());
            let err = result.into_result().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Timed out after 5000ms waiting for spinner"
            );
        }
    }

    mod poll_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_initial_delay_at_timeout_skips_checks() {
            let calls = AtomicU32::new(0);
            let result = poll_until(&options(500, 500, 10), "never", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(true) }
            })
            .await
            .unwrap();
            assert_eq!(result.outcome, WaitOutcome::TimedOut);
            assert_eq!(result.checks, 0);
            assert_eq!(result.elapsed, Duration::ZERO);
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_always_false_checks_iterations_plus_one() {
            let calls = AtomicU32::new(0);
            let result = poll_until(&options(5000, 500, 10), "never", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(false) }
            })
            .await
            .unwrap();
            assert_eq!(result.outcome, WaitOutcome::TimedOut);
            assert_eq!(result.checks, 11);
            assert_eq!(calls.load(Ordering::SeqCst), 11);
            assert_near(result.elapsed, 5000);
        }

        #[tokio::test(start_paused = true)]
        async fn test_ready_on_third_check() {
            let calls = AtomicU32::new(0);
            let result = poll_until(&options(5000, 500, 10), "third time", || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok(n >= 3) }
            })
            .await
            .unwrap();
            assert!(result.is_ready());
            assert_eq!(result.checks, 3);
            assert_near(result.elapsed, 1400);
        }

        #[tokio::test(start_paused = true)]
        async fn test_predicate_error_aborts() {
            let calls = AtomicU32::new(0);
            let err = poll_until(&options(5000, 500, 10), "broken", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(E2eError::driver("find", "session deleted")) }
            })
            .await
            .unwrap_err();
            assert!(matches!(err, E2eError::Driver { .. }));
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    mod condition_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_element_vanishes() {
            let driver = MockDriver::new();
            driver.add_element("div.flag", MockElement::default().vanish_after(2));
            let result = Waiter::new()
                .wait_for_vanish(&driver, "div.flag")
                .await
                .unwrap();
            assert!(result.is_ready());
            assert_eq!(result.checks, 3);
            assert_eq!(result.waited_for, "div.flag to vanish");
        }

        #[tokio::test(start_paused = true)]
        async fn test_element_never_vanishes_times_out() {
            let driver = MockDriver::new();
            driver.add_element("div.flag", MockElement::default());
            let result = Waiter::new()
                .wait_for_vanish(&driver, "div.flag")
                .await
                .unwrap();
            assert_eq!(result.outcome, WaitOutcome::TimedOut);
            assert!(result.into_result().is_err());
        }

        #[tokio::test(start_paused = true)]
        async fn test_lookup_error_is_not_absence() {
            let driver = MockDriver::new();
            driver.break_selector("div.flag", "invalid session id");
            let err = Waiter::new()
                .wait_for_vanish(&driver, "div.flag")
                .await
                .unwrap_err();
            assert!(matches!(err, E2eError::Driver { .. }));
        }

        #[tokio::test(start_paused = true)]
        async fn test_element_appears() {
            let driver = MockDriver::new();
            driver.add_element("form", MockElement::default().appear_after(4));
            let result = Waiter::new()
                .wait_for_element(&driver, "form")
                .await
                .unwrap();
            assert_eq!(result.checks, 5);
        }

        #[tokio::test(start_paused = true)]
        async fn test_url_is_one_of() {
            let driver = MockDriver::new();
            driver.set_url("https://plog.org:8004/#/login");
            let urls = vec![
                "https://plog.org:8004/#/album".to_string(),
                "https://plog.org:8004/#/login".to_string(),
            ];
            let result = Waiter::new().wait_for_url(&driver, &urls).await.unwrap();
            assert!(result.is_ready());
            assert_eq!(result.checks, 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_document_ready_requires_complete() {
            let driver = MockDriver::new();
            driver.on_script("readyState", serde_json::json!("interactive"));
            let waiter = Waiter::with_options(options(1000, 0, 2));
            let result = waiter.wait_for_document_ready(&driver).await.unwrap();
            assert_eq!(result.outcome, WaitOutcome::TimedOut);

            driver.on_script("readyState", serde_json::json!("complete"));
            let result = waiter.wait_for_document_ready(&driver).await.unwrap();
            assert!(result.is_ready());
        }

        #[tokio::test(start_paused = true)]
        async fn test_document_ready_non_string_is_script_error() {
            let driver = MockDriver::new();
            driver.on_script("readyState", serde_json::json!(null));
            let err = Waiter::new()
                .wait_for_document_ready(&driver)
                .await
                .unwrap_err();
            assert!(matches!(err, E2eError::Script { .. }));
        }

        #[tokio::test(start_paused = true)]
        async fn test_fn_condition() {
            let driver = MockDriver::new();
            let condition = FnCondition::new(|| async { Ok(true) }, "always");
            assert_eq!(condition.description(), "always");
            let result = Waiter::new().wait_for(&driver, &condition).await.unwrap();
            assert!(result.is_ready());
            assert_near(result.elapsed, 500);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn paused_runtime() -> tokio::runtime::Runtime {
            tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap()
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_always_false_check_count(
                timeout_ms in 1u64..20_000,
                initial_ms in 0u64..5_000,
                iterations in 1u32..30,
            ) {
                let options = options(timeout_ms, initial_ms, iterations);
                let result = paused_runtime()
                    .block_on(poll_until(&options, "never", || async { Ok(false) }))
                    .unwrap();
                prop_assert_eq!(result.outcome, WaitOutcome::TimedOut);
                if initial_ms >= timeout_ms {
                    prop_assert_eq!(result.checks, 0);
                    prop_assert_eq!(result.elapsed, Duration::ZERO);
                } else {
                    prop_assert_eq!(result.checks, iterations + 1);
                    prop_assert!(result.elapsed >= Duration::from_millis(initial_ms));
                }
            }

            #[test]
            fn prop_ready_stops_early(
                ready_at in 1u32..11,
            ) {
                let options = options(5000, 500, 10);
                let calls = AtomicU32::new(0);
                let result = paused_runtime()
                    .block_on(poll_until(&options, "eventually", || {
                        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                        async move { Ok(n >= ready_at) }
                    }))
                    .unwrap();
                prop_assert!(result.is_ready());
                prop_assert_eq!(result.checks, ready_at);
                prop_assert!(result.elapsed < options.timeout);
            }
        }
    }
}
