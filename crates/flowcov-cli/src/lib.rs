//! flowcov CLI library
//!
//! Command-line front end for the flowcov flow coverage reporter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, GrepArgs, ReportArgs, TagsArgs};
pub use config::{CliConfig, ColorChoice, Verbosity, DEFAULT_CATALOG_PATH};
pub use error::{CliError, CliResult};
pub use output::Output;
