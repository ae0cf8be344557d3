//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use plog_e2e::Suite;
use std::path::PathBuf;

/// plog-e2e: browser-driven end-to-end suite for the Plog photo log
#[derive(Parser, Debug)]
#[command(name = "plog-e2e")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Suite settings
    #[command(flatten)]
    pub suite: SuiteArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Settings that override the configuration file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct SuiteArgs {
    /// YAML configuration file
    #[arg(long, global = true, env = "PLOG_E2E_CONFIG")]
    pub config: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(long, global = true, env = "PLOG_E2E_WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Base URL of the application under test
    #[arg(long, global = true, env = "PLOG_E2E_BASE_URL")]
    pub base_url: Option<String>,

    /// Browser name requested from the WebDriver server
    #[arg(long, global = true, env = "PLOG_E2E_BROWSER")]
    pub browser: Option<String>,

    /// Directory the mail bot delivers into
    #[arg(long, global = true, env = "PLOG_E2E_MAILBOX_DIR")]
    pub mailbox_dir: Option<PathBuf>,

    /// Directory for failure screenshots
    #[arg(long, global = true, env = "PLOG_E2E_SCREENSHOT_DIR")]
    pub screenshot_dir: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a suite against the configured browser and application
    Run(RunArgs),

    /// List the scenarios of a suite in run order
    List(ListArgs),

    /// Show the resolved configuration as YAML
    Config,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Suite to run
    #[arg(short, long, default_value = "all")]
    pub suite: SuiteArg,

    /// Stop at the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Suite to list
    #[arg(short, long, default_value = "all")]
    pub suite: SuiteArg,
}

/// Suite selection
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuiteArg {
    /// Every suite in order
    #[default]
    All,
    /// Registration
    Register,
    /// Email verification
    Verify,
    /// Login and logout
    Login,
    /// Profile editing
    Profile,
    /// Password reset request
    Reset,
}

impl From<SuiteArg> for Suite {
    fn from(arg: SuiteArg) -> Self {
        match arg {
            SuiteArg::All => Self::All,
            SuiteArg::Register => Self::Register,
            SuiteArg::Verify => Self::Verify,
            SuiteArg::Login => Self::Login,
            SuiteArg::Profile => Self::Profile,
            SuiteArg::Reset => Self::Reset,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_run_defaults() {
            let cli = Cli::try_parse_from(["plog-e2e", "run"]).unwrap();
            match cli.command {
                Commands::Run(args) => {
                    assert_eq!(args.suite, SuiteArg::All);
                    assert!(!args.fail_fast);
                }
                _ => panic!("expected run command"),
            }
        }

        #[test]
        fn test_run_suite_and_fail_fast() {
            let cli = Cli::try_parse_from(["plog-e2e", "run", "--suite", "profile", "--fail-fast"])
                .unwrap();
            match cli.command {
                Commands::Run(args) => {
                    assert_eq!(Suite::from(args.suite), Suite::Profile);
                    assert!(args.fail_fast);
                }
                _ => panic!("expected run command"),
            }
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::try_parse_from([
                "plog-e2e",
                "list",
                "--base-url",
                "https://staging.plog.org",
                "-vv",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(
                cli.suite.base_url.as_deref(),
                Some("https://staging.plog.org")
            );
        }

        #[test]
        fn test_unknown_suite_rejected() {
            assert!(Cli::try_parse_from(["plog-e2e", "run", "--suite", "smoke"]).is_err());
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["plog-e2e"]).is_err());
        }
    }

    mod suite_arg_tests {
        use super::*;

        #[test]
        fn test_every_suite_maps() {
            for (arg, name) in [
                (SuiteArg::All, "all"),
                (SuiteArg::Register, "register"),
                (SuiteArg::Verify, "verify"),
                (SuiteArg::Login, "login"),
                (SuiteArg::Profile, "profile"),
                (SuiteArg::Reset, "reset"),
            ] {
                assert_eq!(Suite::from(arg).name(), name);
            }
        }
    }
}
