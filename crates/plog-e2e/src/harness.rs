//! Suite harness: runs scenarios in order against one browser session.

use crate::browser::{BrowserConfig, RemoteBrowser};
use crate::config::SuiteConfig;
use crate::driver::BrowserDriver;
use crate::fixture::SuiteFixture;
use crate::result::{E2eResult, ErrorCategory};
use crate::scenarios::{run_scenario, ScenarioId, Suite};
use crate::session::Session;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Result of running a single scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario
    pub id: ScenarioId,
    /// Whether the scenario passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Error category if failed
    pub category: Option<ErrorCategory>,
    /// Scenario duration
    pub duration: Duration,
    /// Screenshot taken after a failure
    pub screenshot: Option<PathBuf>,
}

impl ScenarioResult {
    /// Create a passing result
    #[must_use]
    pub const fn pass(id: ScenarioId, duration: Duration) -> Self {
        Self {
            id,
            passed: true,
            error: None,
            category: None,
            duration,
            screenshot: None,
        }
    }

    /// Create a failing result
    #[must_use]
    pub fn fail(
        id: ScenarioId,
        error: impl Into<String>,
        category: ErrorCategory,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            passed: false,
            error: Some(error.into()),
            category: Some(category),
            duration,
            screenshot: None,
        }
    }
}

/// Results from running a suite
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Suite name
    pub suite: Suite,
    /// Results of the scenarios that ran
    pub results: Vec<ScenarioResult>,
    /// Scenarios not run because the run stopped early
    pub skipped: Vec<ScenarioId>,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Check if every scenario ran and passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.skipped.is_empty() && self.results.iter().all(|r| r.passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Get total scenario count, skipped included
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len() + self.skipped.len()
    }

    /// Get failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Runner for suites
#[derive(Debug, Clone, Default)]
pub struct SuiteRunner {
    /// Whether to stop on first failure
    pub fail_fast: bool,
    /// Where failure screenshots go; `None` disables them
    pub screenshot_dir: Option<PathBuf>,
}

impl SuiteRunner {
    /// Create a new runner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner configured from the suite settings
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self {
            fail_fast: false,
            screenshot_dir: config.screenshot_dir.clone(),
        }
    }

    /// Enable fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Save a screenshot of the page after each failure
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    /// Connect to the configured WebDriver server and run `suite`.
    ///
    /// Fails only when no session can be opened.
    pub async fn run_suite(&self, config: SuiteConfig, suite: Suite) -> E2eResult<SuiteResults> {
        let browser = RemoteBrowser::connect(BrowserConfig::from(&config)).await?;
        let session = Session::new(browser, config);
        let mut fixture = SuiteFixture::new();
        Ok(self.run(&session, &mut fixture, suite).await)
    }

    /// Run a suite on an open session, then end the session
    pub async fn run<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        fixture: &mut SuiteFixture,
        suite: Suite,
    ) -> SuiteResults {
        let start = Instant::now();
        let scenarios = suite.scenarios();
        let mut results = Vec::with_capacity(scenarios.len());
        let mut skipped = Vec::new();

        for (index, &id) in scenarios.iter().enumerate() {
            tracing::info!(scenario = %id, "scenario started");
            let scenario_start = Instant::now();
            let outcome = run_scenario(id, session, fixture).await;
            let duration = scenario_start.elapsed();

            match outcome {
                Ok(()) => {
                    tracing::info!(scenario = %id, ?duration, "scenario passed");
                    results.push(ScenarioResult::pass(id, duration));
                }
                Err(err) => {
                    tracing::error!(scenario = %id, error = %err, "scenario failed");
                    let mut result =
                        ScenarioResult::fail(id, err.to_string(), err.category(), duration);
                    result.screenshot = self.capture_failure(session, id).await;
                    results.push(result);

                    if err.is_fatal() || self.fail_fast {
                        skipped.extend_from_slice(&scenarios[index + 1..]);
                        tracing::warn!(remaining = skipped.len(), "stopping run");
                        break;
                    }
                }
            }
        }

        if let Err(err) = session.quit().await {
            tracing::warn!(error = %err, "failed to end browser session");
        }

        SuiteResults {
            suite,
            results,
            skipped,
            duration: start.elapsed(),
        }
    }

    async fn capture_failure<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        id: ScenarioId,
    ) -> Option<PathBuf> {
        let dir = self.screenshot_dir.as_ref()?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("{stamp}-{id}.png"));
        match session.screenshot_to_file(&path).await {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!(scenario = %id, error = %err, "failure screenshot not saved");
                None
            }
        }
    }
}
