//! plog-e2e: run the Plog end-to-end suite from the command line
//!
//! ## Usage
//!
//! ```bash
//! plog-e2e run                          # Run every suite in order
//! plog-e2e run --suite login -v         # One suite, with progress logs
//! plog-e2e list --suite profile         # Scenario names in run order
//! plog-e2e --config ci.yaml config      # Show the resolved configuration
//! ```

use clap::Parser;
use plog_e2e_cli::{
    list_scenarios, render_config, resolve_suite_config, run_suite, Cli, CliConfig, CliResult,
    Commands, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_logging(verbosity);
    let config = CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into());

    match cli.command {
        Commands::Run(args) => {
            let suite_config = resolve_suite_config(&cli.suite, |key| std::env::var(key).ok())?;
            run_suite(&config, suite_config, &args)
        }
        Commands::List(args) => {
            for name in list_scenarios(&args) {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Config => {
            let suite_config = resolve_suite_config(&cli.suite, |key| std::env::var(key).ok())?;
            print!("{}", render_config(&suite_config)?);
            Ok(())
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
