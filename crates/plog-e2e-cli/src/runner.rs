//! Command handlers

use crate::commands::{ListArgs, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use plog_e2e::{Suite, SuiteConfig, SuiteRunner};

/// Run a suite and report every scenario.
///
/// Fails when the browser session cannot be opened or when any scenario
/// did not pass.
pub fn run_suite(cli: &CliConfig, config: SuiteConfig, args: &RunArgs) -> CliResult<()> {
    let suite = Suite::from(args.suite);
    let mut runner = SuiteRunner::from_config(&config);
    if args.fail_fast {
        runner = runner.with_fail_fast();
    }

    let reporter = Reporter::new(cli.color.should_color(), cli.verbosity.is_quiet());
    if cli.verbosity.is_verbose() {
        reporter.header(&format!(
            "{suite} suite against {} via {}",
            config.base_url, config.webdriver_url
        ));
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("failed to start tokio runtime: {e}")))?;
    let results = rt.block_on(runner.run_suite(config, suite))?;
    reporter.results(&results);

    if results.all_passed() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: results.failed_count() + results.skipped.len(),
            total: results.total(),
        })
    }
}

/// Scenario names of the selected suite in run order
#[must_use]
pub fn list_scenarios(args: &ListArgs) -> Vec<&'static str> {
    Suite::from(args.suite)
        .scenarios()
        .into_iter()
        .map(|id| id.name())
        .collect()
}

/// Resolved configuration as YAML
pub fn render_config(config: &SuiteConfig) -> CliResult<String> {
    Ok(config.to_yaml()?)
}
