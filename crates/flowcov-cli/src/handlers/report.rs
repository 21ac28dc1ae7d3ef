//! Report command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Output;
use crate::ReportArgs;
use flowcov::{
    playwright, read_ndjson, write_artifact, CoverageSnapshot, CoverageStatus, FlowCatalog,
    FlowCoverageAggregator, FlowTagParser, ReportRenderer, TestCompletion, ARTIFACT_FILE_NAME,
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// Where the test-completion events come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// Newline-delimited JSON on standard input
    Stdin,
    /// Newline-delimited JSON file
    Ndjson(PathBuf),
    /// Playwright JSON reporter output
    Playwright(PathBuf),
}

impl EventSource {
    /// Resolve the source selected by the report arguments
    #[must_use]
    pub fn from_args(args: &ReportArgs) -> Self {
        if let Some(path) = &args.playwright {
            Self::Playwright(path.clone())
        } else if args.reads_stdin() {
            Self::Stdin
        } else {
            Self::Ndjson(args.events.clone())
        }
    }

    /// Read every event from the source
    pub fn read(&self) -> CliResult<Vec<TestCompletion>> {
        let events = match self {
            Self::Stdin => read_ndjson(io::stdin().lock())?,
            Self::Ndjson(path) => read_ndjson(BufReader::new(open(path)?))?,
            Self::Playwright(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    CliError::invalid_argument(format!("cannot read {}: {e}", path.display()))
                })?;
                playwright::events_from_json(&json)?
            }
        };
        Ok(events)
    }
}

fn open(path: &Path) -> CliResult<File> {
    File::open(path)
        .map_err(|e| CliError::invalid_argument(format!("cannot read {}: {e}", path.display())))
}

/// Aggregate `events` against `catalog` using the configured tag prefix
#[must_use]
pub fn build_snapshot(
    config: &CliConfig,
    catalog: FlowCatalog,
    events: &[TestCompletion],
) -> CoverageSnapshot {
    let mut aggregator = FlowCoverageAggregator::new(catalog)
        .with_parser(FlowTagParser::new(config.tag_prefix.clone()));
    aggregator.record_all(events);
    aggregator.finalize()
}

/// Path of the artifact inside the output directory
#[must_use]
pub fn artifact_path(output_dir: &Path) -> PathBuf {
    output_dir.join(ARTIFACT_FILE_NAME)
}

/// Execute the report command
pub fn execute_report(config: &CliConfig, args: &ReportArgs) -> CliResult<()> {
    let output = Output::new(config.use_color(), config.verbosity.is_quiet());

    // An absent catalog is already reported by the loader's warning
    let load = FlowCatalog::load(&config.catalog_path)?;

    let source = EventSource::from_args(args);
    let events = source.read()?;
    tracing::debug!(source = ?source, events = events.len(), "read test events");
    if config.verbosity.is_verbose() {
        output.info(&format!("Read {} test events", events.len()));
    }

    let snapshot = build_snapshot(config, load.catalog, &events);

    let mut renderer = ReportRenderer::new().with_color(config.use_color());
    if !args.no_artifact {
        renderer =
            renderer.with_artifact_path(artifact_path(&config.output_dir).display().to_string());
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    renderer
        .render(&snapshot, &mut handle)
        .and_then(|()| handle.flush())
        .map_err(|e| CliError::report_generation(e.to_string()))?;

    if !args.no_artifact {
        let path = write_artifact(&snapshot, &config.output_dir)?;
        output.success(&format!("Wrote {}", path.display()));
    }

    let summary = snapshot.summary();
    output.summary(&summary);

    if args.fail_on_failing && snapshot.has_failing() {
        let ids: Vec<&str> = snapshot
            .with_status(CoverageStatus::Failing)
            .map(|f| f.flow_id.as_str())
            .collect();
        output.failure(&format!("Failing flows: {}", ids.join(", ")));
        return Err(CliError::FailingFlows {
            count: summary.failing,
        });
    }
    Ok(())
}
