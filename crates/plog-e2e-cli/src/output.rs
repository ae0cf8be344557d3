//! Output formatting for suite runs

use console::{style, Style, Term};
use plog_e2e::{ScenarioResult, SuiteResults};
use std::time::Duration;

/// Writes pass/fail lines and the run summary to stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a skipped scenario
    pub fn skipped(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("-").yellow().bold().to_string()
        } else {
            "SKIP".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Print one scenario outcome
    pub fn scenario(&self, result: &ScenarioResult) {
        let line = format!("{} ({:.2}s)", result.id, result.duration.as_secs_f64());
        if result.passed {
            self.success(&line);
            return;
        }

        self.failure(&line);
        if let Some(error) = &result.error {
            let _ = self.term.write_line(&format!("    {error}"));
        }
        if let Some(path) = &result.screenshot {
            let _ = self
                .term
                .write_line(&format!("    screenshot: {}", path.display()));
        }
    }

    /// Print every outcome followed by the summary
    pub fn results(&self, results: &SuiteResults) {
        self.header(&format!("suite {}", results.suite));
        for result in &results.results {
            self.scenario(result);
        }
        for id in &results.skipped {
            self.skipped(&format!("{id} (not run)"));
        }
        self.summary(
            results.passed_count(),
            results.failed_count(),
            results.skipped.len(),
            results.duration,
        );
    }

    /// Print run summary
    pub fn summary(&self, passed: usize, failed: usize, skipped: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }

        let _ = self.term.write_line("");

        let total = passed + failed + skipped;
        let duration_secs = duration.as_secs_f64();
        let failing = failed > 0 || skipped > 0;

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();
            let skipped_style = Style::new().yellow();

            let status = if failing {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };

            let _ = self.term.write_line(&format!(
                "{} {} scenarios in {:.2}s ({} passed, {} failed, {} skipped)",
                status,
                total,
                duration_secs,
                passed_style.apply_to(passed),
                if failed > 0 {
                    failed_style.apply_to(failed).to_string()
                } else {
                    failed.to_string()
                },
                skipped_style.apply_to(skipped)
            ));
        } else {
            let status = if failing { "FAILED" } else { "PASSED" };
            let _ = self.term.write_line(&format!(
                "{status} {total} scenarios in {duration_secs:.2}s ({passed} passed, {failed} failed, {skipped} skipped)"
            ));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use plog_e2e::{ErrorCategory, ScenarioId, Suite};
    use std::path::PathBuf;

    fn sample_results() -> SuiteResults {
        let mut failed = ScenarioResult::fail(
            ScenarioId::Logout,
            "Assertion failed: session token: expected Absent, got Present",
            ErrorCategory::Assertion,
            Duration::from_millis(2300),
        );
        failed.screenshot = Some(PathBuf::from("shots/20261018-101500-logout.png"));
        SuiteResults {
            suite: Suite::Login,
            results: vec![
                ScenarioResult::pass(ScenarioId::LoginTable, Duration::from_secs(4)),
                failed,
            ],
            skipped: vec![],
            duration: Duration::from_secs(7),
        }
    }

    #[test]
    fn test_new_reporter() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_default_reporter() {
        let reporter = Reporter::default();
        assert!(reporter.use_color);
    }

    #[test]
    fn test_results_plain() {
        let reporter = Reporter::new(false, false);
        reporter.results(&sample_results());
        // No panic = success
    }

    #[test]
    fn test_results_colored() {
        let reporter = Reporter::new(true, false);
        reporter.results(&sample_results());
        // No panic = success
    }

    #[test]
    fn test_quiet_mode_still_reports_failures() {
        let reporter = Reporter::new(false, true);
        reporter.header("hidden");
        reporter.success("hidden");
        reporter.skipped("hidden");
        reporter.failure("shown");
        reporter.summary(1, 1, 0, Duration::from_secs(1));
        // No panic = success
    }
}
