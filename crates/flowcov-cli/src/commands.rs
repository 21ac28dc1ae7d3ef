//! CLI command definitions using clap

use crate::config::DEFAULT_CATALOG_PATH;
use clap::{Parser, Subcommand, ValueEnum};
use flowcov::{DEFAULT_FLOW_TAG_PREFIX, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;

/// flowcov: flow coverage reports for end-to-end test suites
#[derive(Parser, Debug)]
#[command(name = "flowcov")]
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

    /// Flow catalog JSON file
    #[arg(
        long,
        global = true,
        env = "FLOWCOV_CATALOG",
        default_value = DEFAULT_CATALOG_PATH
    )]
    pub catalog: PathBuf,

    /// Tag prefix that marks a flow id
    #[arg(
        long,
        global = true,
        env = "FLOWCOV_TAG_PREFIX",
        default_value = DEFAULT_FLOW_TAG_PREFIX
    )]
    pub prefix: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate test results into a flow coverage report
    Report(ReportArgs),

    /// List the modules declared in the flow catalog
    Modules,

    /// Print test runner arguments selecting one module's tests
    Grep(GrepArgs),

    /// Print the tag bundle for a catalog flow
    Tags(TagsArgs),
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Newline-delimited JSON test events ("-" reads stdin)
    #[arg(long, value_name = "PATH", default_value = "-", conflicts_with = "playwright")]
    pub events: PathBuf,

    /// Playwright JSON reporter output to import instead of events
    #[arg(long, value_name = "PATH")]
    pub playwright: Option<PathBuf>,

    /// Directory receiving flow-coverage.json
    #[arg(
        short,
        long,
        env = "FLOWCOV_OUTPUT_DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,

    /// Render the terminal report only
    #[arg(long)]
    pub no_artifact: bool,

    /// Exit non-zero when any flow is failing
    #[arg(long)]
    pub fail_on_failing: bool,
}

impl ReportArgs {
    /// Whether events come from standard input
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.playwright.is_none() && self.events.as_os_str() == "-"
    }
}

/// Arguments for the grep command
#[derive(Parser, Debug)]
pub struct GrepArgs {
    /// Module name, with or without the @module: prefix
    pub module: String,

    /// Extra arguments appended after the grep filter
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Arguments for the tags command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Flow id declared in the catalog
    pub flow_id: String,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
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
