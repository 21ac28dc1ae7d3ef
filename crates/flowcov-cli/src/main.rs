//! flowcov: flow coverage reports for end-to-end test suites
//!
//! ## Usage
//!
//! ```bash
//! flowcov report --playwright results.json    # Import a Playwright JSON report
//! flowcov report --events run.ndjson          # Read NDJSON test events
//! flowcov modules                             # List catalog modules
//! flowcov grep auth --project=chromium        # Runner args for one module
//! flowcov tags auth-login-email               # Tag bundle for one flow
//! ```

use clap::Parser;
use flowcov_cli::{handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};
use std::process::ExitCode;

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

    let config = build_config(&cli);
    logging::init_tracing(config.verbosity, config.use_color())?;

    match cli.command {
        Commands::Report(args) => {
            let config = config.with_output_dir(args.output_dir.clone());
            handlers::execute_report(&config, &args)
        }
        Commands::Modules => handlers::execute_modules(&config),
        Commands::Grep(args) => handlers::execute_grep(&config, &args),
        Commands::Tags(args) => handlers::execute_tags(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_catalog_path(cli.catalog.clone())
        .with_tag_prefix(cli.prefix.clone())
}
