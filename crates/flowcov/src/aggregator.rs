//! Coverage Aggregator
//!
//! Collects one event per completed test and attributes it to catalog flows.
//!
//! # Lifecycle
//!
//! ```text
//! FlowCatalog ──► FlowCoverageAggregator::new     (seed every catalog flow as missing)
//!                      │
//!      TestCompletion ─┤ record()                 (once per finished test, streaming)
//!                      │
//!                      ▼ finalize()               (classify every flow)
//!                 CoverageSnapshot ──► render / write artifact
//! ```
//!
//! The aggregator is owned by one run and is not meant to be shared across
//! threads; hosts that run tests concurrently must serialize completions.

use crate::catalog::{FlowCatalog, FlowDefinition, Priority};
use crate::event::{TestCompletion, TestOutcome};
use crate::status::{classify, percent, CoverageStatus, TestCounts};
use crate::tag::FlowTagParser;
use std::collections::{BTreeMap, BTreeSet};

/// Aggregated results for one flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStats {
    /// Flow id
    pub flow_id: String,
    /// Catalog definition, or a synthesized placeholder
    pub definition: FlowDefinition,
    /// Outcome counters
    pub tests: TestCounts,
    /// Distinct spec files that contributed a test
    pub specs: BTreeSet<String>,
    /// Verdict, `Missing` until finalized
    pub status: CoverageStatus,
}

impl FlowStats {
    /// Empty stats for a flow
    #[must_use]
    pub fn new(flow_id: impl Into<String>, definition: FlowDefinition) -> Self {
        Self {
            flow_id: flow_id.into(),
            definition,
            tests: TestCounts::default(),
            specs: BTreeSet::new(),
            status: CoverageStatus::Missing,
        }
    }

    fn record(&mut self, outcome: TestOutcome, file: &str) {
        self.tests.total += 1;
        if !self.specs.contains(file) {
            self.specs.insert(file.to_string());
        }
        match outcome {
            TestOutcome::Passed => self.tests.passed += 1,
            TestOutcome::Failed | TestOutcome::TimedOut => self.tests.failed += 1,
            TestOutcome::Skipped => self.tests.skipped += 1,
        }
    }
}

/// A test that carried no flow tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedTest {
    /// Test title
    pub title: String,
    /// Spec file
    pub file: String,
}

/// Streaming flow coverage collector
#[derive(Debug, Clone)]
pub struct FlowCoverageAggregator {
    catalog_version: String,
    parser: FlowTagParser,
    flows: BTreeMap<String, FlowStats>,
    unmapped: Vec<UnmappedTest>,
}

impl FlowCoverageAggregator {
    /// Seed one `Missing` entry per catalog flow
    #[must_use]
    pub fn new(catalog: FlowCatalog) -> Self {
        let flows = catalog
            .flows
            .into_iter()
            .map(|(id, definition)| (id.clone(), FlowStats::new(id, definition)))
            .collect();
        Self {
            catalog_version: catalog.version,
            parser: FlowTagParser::default(),
            flows,
            unmapped: Vec::new(),
        }
    }

    /// Use a custom flow-tag parser
    #[must_use]
    pub fn with_parser(mut self, parser: FlowTagParser) -> Self {
        self.parser = parser;
        self
    }

    /// Record one completed test.
    ///
    /// Non-flow tags are ignored. A test tagged with the same flow twice is
    /// counted once for that flow; a test with no flow tag is unmapped.
    pub fn record_test_completion<S: AsRef<str>>(
        &mut self,
        title: &str,
        tags: &[S],
        outcome: TestOutcome,
        file: &str,
    ) {
        let flow_ids = self.parser.flow_ids(tags);
        if flow_ids.is_empty() {
            tracing::trace!(title, file, "test has no flow tag");
            self.unmapped.push(UnmappedTest {
                title: title.to_string(),
                file: file.to_string(),
            });
            return;
        }

        for flow_id in flow_ids {
            let stats = self.flows.entry(flow_id.to_string()).or_insert_with(|| {
                tracing::debug!(flow_id, file, "flow not in catalog, synthesizing definition");
                FlowStats::new(flow_id, FlowDefinition::synthesized(flow_id))
            });
            stats.record(outcome, file);
        }
    }

    /// Record a [`TestCompletion`] event
    pub fn record(&mut self, event: &TestCompletion) {
        self.record_test_completion(&event.title, &event.tags, event.outcome, &event.file);
    }

    /// Record every event in order
    pub fn record_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a TestCompletion>,
    {
        for event in events {
            self.record(event);
        }
    }

    /// Current stats for a flow
    #[must_use]
    pub fn flow(&self, flow_id: &str) -> Option<&FlowStats> {
        self.flows.get(flow_id)
    }

    /// Number of flows tracked so far (catalog plus synthesized)
    #[must_use]
    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    /// Tests recorded without a flow tag
    #[must_use]
    pub fn unmapped(&self) -> &[UnmappedTest] {
        &self.unmapped
    }

    /// Classify every flow and freeze the run
    #[must_use]
    pub fn finalize(mut self) -> CoverageSnapshot {
        for stats in self.flows.values_mut() {
            stats.status = classify(&stats.tests);
        }
        let snapshot = CoverageSnapshot {
            catalog_version: self.catalog_version,
            flows: self.flows,
            unmapped: self.unmapped,
        };
        tracing::info!(
            flows = snapshot.flows.len(),
            unmapped = snapshot.unmapped.len(),
            "flow coverage finalized"
        );
        snapshot
    }
}

/// Summary counters by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    /// All flows, catalog and synthesized
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

impl CoverageSummary {
    /// Count for one status
    #[must_use]
    pub const fn count(&self, status: CoverageStatus) -> usize {
        match status {
            CoverageStatus::Covered => self.covered,
            CoverageStatus::Partial => self.partial,
            CoverageStatus::Failing => self.failing,
            CoverageStatus::Missing => self.missing,
        }
    }

    /// Share of all flows with `status`, in percent
    #[must_use]
    pub fn percent_of(&self, status: CoverageStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / self.total as f64 * 100.0
    }
}

/// Covered-flow rollup for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCoverage {
    /// Module name
    pub module: String,
    /// Covered flows
    pub covered: usize,
    /// All flows in the module
    pub total: usize,
}

impl ModuleCoverage {
    /// Covered share as a whole-number percentage
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent(self.covered as u32, self.total as u32)
    }
}

/// Finalized, read-only result of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageSnapshot {
    /// Catalog version the run was attributed against
    pub catalog_version: String,
    /// Every flow keyed by id
    pub flows: BTreeMap<String, FlowStats>,
    /// Tests without a flow tag, in arrival order
    pub unmapped: Vec<UnmappedTest>,
}

impl CoverageSnapshot {
    /// Counts by status
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        let mut summary = CoverageSummary {
            total: self.flows.len(),
            ..CoverageSummary::default()
        };
        for stats in self.flows.values() {
            match stats.status {
                CoverageStatus::Covered => summary.covered += 1,
                CoverageStatus::Partial => summary.partial += 1,
                CoverageStatus::Failing => summary.failing += 1,
                CoverageStatus::Missing => summary.missing += 1,
            }
        }
        summary
    }

    /// Flows with the given status, ordered by id
    pub fn with_status(&self, status: CoverageStatus) -> impl Iterator<Item = &FlowStats> {
        self.flows.values().filter(move |f| f.status == status)
    }

    /// Missing flows grouped by tier, most severe first, empty tiers omitted
    #[must_use]
    pub fn missing_by_priority(&self) -> Vec<(Priority, Vec<&FlowStats>)> {
        Priority::ALL
            .iter()
            .map(|&priority| {
                let flows: Vec<_> = self
                    .with_status(CoverageStatus::Missing)
                    .filter(|f| f.definition.priority == priority)
                    .collect();
                (priority, flows)
            })
            .filter(|(_, flows)| !flows.is_empty())
            .collect()
    }

    /// Covered/total per module, modules in alphabetical order
    #[must_use]
    pub fn module_rollup(&self) -> Vec<ModuleCoverage> {
        let mut by_module: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for stats in self.flows.values() {
            let entry = by_module.entry(stats.definition.module.as_str()).or_default();
            entry.1 += 1;
            if stats.status == CoverageStatus::Covered {
                entry.0 += 1;
            }
        }
        by_module
            .into_iter()
            .map(|(module, (covered, total))| ModuleCoverage {
                module: module.to_string(),
                covered,
                total,
            })
            .collect()
    }

    /// Unmapped test count per spec file, keyed by file
    #[must_use]
    pub fn unmapped_files(&self) -> BTreeMap<&str, usize> {
        let mut files = BTreeMap::new();
        for test in &self.unmapped {
            *files.entry(test.file.as_str()).or_insert(0) += 1;
        }
        files
    }

    /// Unmapped files ordered by count descending, then path
    #[must_use]
    pub fn unmapped_files_ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.unmapped_files().into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Whether any flow is failing
    #[must_use]
    pub fn has_failing(&self) -> bool {
        self.with_status(CoverageStatus::Failing).next().is_some()
    }
}
