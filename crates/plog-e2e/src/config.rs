//! Suite configuration
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `PLOG_E2E_*` environment variables, then whatever the caller sets through
//! the builder methods (the CLI maps its flags onto those).

use crate::result::{E2eError, E2eResult};
use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default WebDriver hub
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444/wd/hub";

/// Default application under test
pub const DEFAULT_BASE_URL: &str = "https://plog.org:8004";

/// Default mailbox directory written by the mail bot
pub const DEFAULT_MAILBOX_DIR: &str = "/tmp/mailbot.boxes";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PLOG_E2E_";

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// WebDriver server URL
    pub webdriver_url: String,
    /// Browser name sent in the capabilities
    pub browser: String,
    /// Ask the browser to run headless
    pub headless: bool,
    /// Application base URL, without trailing slash
    pub base_url: String,
    /// Directory holding one mailbox file per recipient
    pub mailbox_dir: PathBuf,
    /// Mailbox read attempts before giving up
    pub mailbox_attempts: u32,
    /// Delay between mailbox read attempts (ms)
    pub mailbox_retry_ms: u64,
    /// Total budget of each page wait (ms)
    pub wait_timeout_ms: u64,
    /// Fixed delay before the first check of a wait (ms)
    pub wait_initial_delay_ms: u64,
    /// Number of evenly spaced intervals after the initial delay
    pub wait_iterations: u32,
    /// Selector of the loading indicator shown while the app is busy
    pub loading_selector: String,
    /// Where to write screenshots of failed scenarios
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            browser: "chrome".to_string(),
            headless: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            mailbox_dir: PathBuf::from(DEFAULT_MAILBOX_DIR),
            mailbox_attempts: 5,
            mailbox_retry_ms: 1_000,
            wait_timeout_ms: 5_000,
            wait_initial_delay_ms: 500,
            wait_iterations: 10,
            loading_selector: "div[class='selenium-flag']".to_string(),
            screenshot_dir: None,
        }
    }
}

impl SuiteConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> E2eResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> E2eResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            E2eError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> E2eResult<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PLOG_E2E_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> E2eResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("WEBDRIVER_URL") {
            self.webdriver_url = v;
        }
        if let Some(v) = var("BROWSER") {
            self.browser = v;
        }
        if let Some(v) = var("HEADLESS") {
            self.headless = parse_env("HEADLESS", &v)?;
        }
        if let Some(v) = var("BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("MAILBOX_DIR") {
            self.mailbox_dir = PathBuf::from(v);
        }
        if let Some(v) = var("MAILBOX_ATTEMPTS") {
            self.mailbox_attempts = parse_env("MAILBOX_ATTEMPTS", &v)?;
        }
        if let Some(v) = var("WAIT_TIMEOUT_MS") {
            self.wait_timeout_ms = parse_env("WAIT_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = var("SCREENSHOT_DIR") {
            self.screenshot_dir = Some(PathBuf::from(v));
        }

        self.validate()?;
        Ok(self)
    }

    /// Set WebDriver URL
    #[must_use]
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    /// Set browser name
    #[must_use]
    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = browser.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set application base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set mailbox directory
    #[must_use]
    pub fn with_mailbox_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mailbox_dir = dir.into();
        self
    }

    /// Set delay between mailbox read attempts
    #[must_use]
    pub const fn with_mailbox_retry_ms(mut self, ms: u64) -> Self {
        self.mailbox_retry_ms = ms;
        self
    }

    /// Set failure screenshot directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    /// Set the total wait budget
    #[must_use]
    pub const fn with_wait_timeout_ms(mut self, ms: u64) -> Self {
        self.wait_timeout_ms = ms;
        self
    }

    /// Set the initial wait delay
    #[must_use]
    pub const fn with_wait_initial_delay_ms(mut self, ms: u64) -> Self {
        self.wait_initial_delay_ms = ms;
        self
    }

    /// Absolute URL for an application path such as `/#/profile`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Wait options derived from this config
    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(self.wait_timeout_ms))
            .with_initial_delay(Duration::from_millis(self.wait_initial_delay_ms))
            .with_iterations(self.wait_iterations)
    }

    /// Delay between mailbox attempts
    #[must_use]
    pub const fn mailbox_retry_delay(&self) -> Duration {
        Duration::from_millis(self.mailbox_retry_ms)
    }

    /// Reject values no run could succeed with
    pub fn validate(&self) -> E2eResult<()> {
        if !self.webdriver_url.starts_with("http://") && !self.webdriver_url.starts_with("https://")
        {
            return Err(E2eError::config(format!(
                "webdriver_url must be an http(s) URL, got {:?}",
                self.webdriver_url
            )));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(E2eError::config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.wait_iterations == 0 {
            return Err(E2eError::config("wait_iterations must be at least 1"));
        }
        if self.mailbox_attempts == 0 {
            return Err(E2eError::config("mailbox_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> E2eResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> E2eResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| E2eError::config(format!("{ENV_PREFIX}{name}: invalid value {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444/wd/hub");
        assert_eq!(config.browser, "chrome");
        assert_eq!(config.base_url, "https://plog.org:8004");
        assert_eq!(config.mailbox_dir, PathBuf::from("/tmp/mailbot.boxes"));
        assert_eq!(config.mailbox_attempts, 5);
        assert_eq!(config.wait_timeout_ms, 5_000);
        assert_eq!(config.wait_initial_delay_ms, 500);
        assert_eq!(config.wait_iterations, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_joins_paths() {
        let config = SuiteConfig::default().with_base_url("https://plog.test/");
        assert_eq!(config.url("/#/profile"), "https://plog.test/#/profile");
        assert_eq!(config.url("/"), "https://plog.test/");
    }

    #[test]
    fn test_yaml_partial_keeps_defaults() {
        let config = SuiteConfig::from_yaml_str(
            "base_url: https://staging.plog.org\nwait_timeout_ms: 8000\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "https://staging.plog.org");
        assert_eq!(config.wait_timeout_ms, 8000);
        assert_eq!(config.browser, "chrome");
    }

    #[test]
    fn test_yaml_invalid_url_rejected() {
        let err = SuiteConfig::from_yaml_str("webdriver_url: localhost:4444\n").unwrap_err();
        assert!(matches!(err, E2eError::Config { .. }));
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.yaml");
        let original = SuiteConfig::default().with_screenshot_dir("/tmp/shots");
        std::fs::write(&path, original.to_yaml().unwrap()).unwrap();
        assert_eq!(SuiteConfig::from_yaml_file(&path).unwrap(), original);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = SuiteConfig::from_yaml_file("/nonexistent/plog.yaml").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PLOG_E2E_WEBDRIVER_URL", "http://grid:4444/wd/hub"),
            ("PLOG_E2E_HEADLESS", "true"),
            ("PLOG_E2E_MAILBOX_DIR", "/var/mail/bot"),
            ("PLOG_E2E_WAIT_TIMEOUT_MS", "7000"),
        ]);
        let config = SuiteConfig::default()
            .with_env_overrides(|k| env.get(k).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.webdriver_url, "http://grid:4444/wd/hub");
        assert!(config.headless);
        assert_eq!(config.mailbox_dir, PathBuf::from("/var/mail/bot"));
        assert_eq!(config.wait_timeout_ms, 7000);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_bad_number() {
        let err = SuiteConfig::default()
            .with_env_overrides(|k| (k == "PLOG_E2E_WAIT_TIMEOUT_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PLOG_E2E_WAIT_TIMEOUT_MS"));
    }

    #[test]
    fn test_wait_options_from_config() {
        let options = SuiteConfig::default().wait_options();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.initial_delay, Duration::from_millis(500));
        assert_eq!(options.iterations, 10);
    }
}
