//! JSON artifact for CI gating and dashboards.
//!
//! The field names and nesting here are a contract with downstream tooling;
//! maps and lists are emitted in sorted order so successive runs diff cleanly.

use crate::aggregator::{CoverageSnapshot, CoverageSummary, FlowStats};
use crate::catalog::FlowDefinition;
use crate::result::{FlowCovError, FlowCovResult};
use crate::status::{CoverageStatus, TestCounts};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixed artifact file name
pub const ARTIFACT_FILE_NAME: &str = "flow-coverage.json";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "e2e-results";

/// One flow in the artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRecord {
    /// Flow id
    pub flow_id: String,
    /// Catalog or synthesized definition
    pub definition: FlowDefinition,
    /// Outcome counters
    pub tests: TestCounts,
    /// Contributing spec files, sorted
    pub specs: Vec<String>,
    /// Verdict
    pub status: CoverageStatus,
}

impl From<&FlowStats> for FlowRecord {
    fn from(stats: &FlowStats) -> Self {
        Self {
            flow_id: stats.flow_id.clone(),
            definition: stats.definition.clone(),
            tests: stats.tests,
            specs: stats.specs.iter().cloned().collect(),
            status: stats.status,
        }
    }
}

/// Summary block of the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// All flows
    pub total: usize,
    /// Covered flows
    pub covered: usize,
    /// Partial flows
    pub partial: usize,
    /// Failing flows
    pub failing: usize,
    /// Missing flows
    pub missing: usize,
}

impl From<CoverageSummary> for SummaryRecord {
    fn from(summary: CoverageSummary) -> Self {
        Self {
            total: summary.total,
            covered: summary.covered,
            partial: summary.partial,
            failing: summary.failing,
            missing: summary.missing,
        }
    }
}

/// Unmapped-test index of the artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedRecord {
    /// Tests without a flow tag
    pub count: usize,
    /// Count per spec file
    pub files: BTreeMap<String, usize>,
}

/// The `flow-coverage.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowCoverageArtifact {
    /// RFC 3339 UTC generation time
    pub timestamp: String,
    /// Catalog version
    pub catalog_version: String,
    /// Counts by status
    pub summary: SummaryRecord,
    /// Every flow keyed by id
    pub flows: BTreeMap<String, FlowRecord>,
    /// Tests without a flow tag
    pub unmapped_tests: UnmappedRecord,
}

impl FlowCoverageArtifact {
    /// Build the artifact stamped with the current time
    #[must_use]
    pub fn from_snapshot(snapshot: &CoverageSnapshot) -> Self {
        Self::with_timestamp(
            snapshot,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Build the artifact with an explicit timestamp
    #[must_use]
    pub fn with_timestamp(snapshot: &CoverageSnapshot, timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            catalog_version: snapshot.catalog_version.clone(),
            summary: snapshot.summary().into(),
            flows: snapshot
                .flows
                .iter()
                .map(|(id, stats)| (id.clone(), FlowRecord::from(stats)))
                .collect(),
            unmapped_tests: UnmappedRecord {
                count: snapshot.unmapped.len(),
                files: snapshot
                    .unmapped_files()
                    .into_iter()
                    .map(|(file, count)| (file.to_string(), count))
                    .collect(),
            },
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an artifact back from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to `<output_dir>/flow-coverage.json`, creating the directory.
    ///
    /// Returns the path written.
    pub fn write_to_dir(&self, output_dir: &Path) -> FlowCovResult<PathBuf> {
        let path = output_dir.join(ARTIFACT_FILE_NAME);
        std::fs::create_dir_all(output_dir).map_err(|source| FlowCovError::ArtifactWrite {
            path: path.clone(),
            source,
        })?;
        let json = self.to_json()?;
        std::fs::write(&path, json).map_err(|source| FlowCovError::ArtifactWrite {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote flow coverage artifact");
        Ok(path)
    }
}

/// Build and write the artifact for `snapshot` under `output_dir`
pub fn write_artifact(snapshot: &CoverageSnapshot, output_dir: &Path) -> FlowCovResult<PathBuf> {
    FlowCoverageArtifact::from_snapshot(snapshot).write_to_dir(output_dir)
}
