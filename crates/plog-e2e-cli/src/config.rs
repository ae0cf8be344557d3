//! CLI configuration

use crate::commands::SuiteArgs;
use crate::error::CliResult;
use plog_e2e::SuiteConfig;
use serde::{Deserialize, Serialize};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Verbosity from the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "plog_e2e=info,warn",
            Self::Debug => "plog_e2e=debug,info",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors, detecting a terminal on stderr where reports go
    #[must_use]
    pub fn should_color(self) -> bool {
        self.should_color_for(&std::io::stderr())
    }

    fn should_color_for(self, stream: &impl std::io::IsTerminal) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Resolve the suite configuration.
///
/// Layers, lowest first: built-in defaults, the YAML file, `PLOG_E2E_*`
/// variables read through `lookup`, then command-line flags.
pub fn resolve_suite_config<F>(args: &SuiteArgs, lookup: F) -> CliResult<SuiteConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match &args.config {
        Some(path) => SuiteConfig::from_yaml_file(path)?,
        None => SuiteConfig::default(),
    };
    let mut config = base.with_env_overrides(lookup)?;

    if let Some(url) = &args.webdriver_url {
        config = config.with_webdriver_url(url);
    }
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(browser) = &args.browser {
        config = config.with_browser(browser);
    }
    if let Some(dir) = &args.mailbox_dir {
        config = config.with_mailbox_dir(dir);
    }
    if let Some(dir) = &args.screenshot_dir {
        config = config.with_screenshot_dir(dir);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 3), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
        }

        #[test]
        fn test_predicates() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_log_filter() {
            assert_eq!(Verbosity::Normal.log_filter(), "warn");
            assert!(Verbosity::Debug.log_filter().contains("plog_e2e=debug"));
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_auto_follows_report_stream() {
            let file = tempfile::tempfile().unwrap();
            assert!(!ColorChoice::Auto.should_color_for(&file));
            assert!(ColorChoice::Always.should_color_for(&file));
            assert!(!ColorChoice::Never.should_color_for(&file));
        }

        #[test]
        fn test_fixed_choices_ignore_terminal() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = resolve_suite_config(&SuiteArgs::default(), no_env).unwrap();
            assert_eq!(config, SuiteConfig::default());
        }

        #[test]
        fn test_flags_beat_environment() {
            let args = SuiteArgs {
                base_url: Some("https://flag.plog.org".to_string()),
                ..SuiteArgs::default()
            };
            let config = resolve_suite_config(&args, |key| match key {
                "PLOG_E2E_BASE_URL" => Some("https://env.plog.org".to_string()),
                "PLOG_E2E_BROWSER" => Some("firefox".to_string()),
                _ => None,
            })
            .unwrap();
            assert_eq!(config.base_url, "https://flag.plog.org");
            assert_eq!(config.browser, "firefox");
        }

        #[test]
        fn test_yaml_file_layer() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("plog-e2e.yaml");
            std::fs::write(
                &path,
                "browser: firefox\nmailbox_dir: /srv/mailbot\nwait_timeout_ms: 8000\n",
            )
            .unwrap();
            let args = SuiteArgs {
                config: Some(path),
                screenshot_dir: Some(PathBuf::from("shots")),
                ..SuiteArgs::default()
            };
            let config = resolve_suite_config(&args, no_env).unwrap();
            assert_eq!(config.browser, "firefox");
            assert_eq!(config.mailbox_dir, PathBuf::from("/srv/mailbot"));
            assert_eq!(config.wait_timeout_ms, 8000);
            assert_eq!(config.screenshot_dir, Some(PathBuf::from("shots")));
        }

        #[test]
        fn test_invalid_flag_rejected() {
            let args = SuiteArgs {
                webdriver_url: Some("localhost:4444".to_string()),
                ..SuiteArgs::default()
            };
            assert!(resolve_suite_config(&args, no_env).is_err());
        }

        #[test]
        fn test_missing_file_rejected() {
            let args = SuiteArgs {
                config: Some(PathBuf::from("/nonexistent/plog-e2e.yaml")),
                ..SuiteArgs::default()
            };
            assert!(resolve_suite_config(&args, no_env).is_err());
        }
    }
}
