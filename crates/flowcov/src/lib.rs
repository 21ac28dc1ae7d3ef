//! flowcov: Flow Coverage for End-to-End Test Suites
//!
//! Aggregates end-to-end test outcomes against a declared catalog of business
//! flows and reports which flows are covered, partially covered, failing or
//! missing, per flow and per module.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    FLOWCOV Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Flow       │    │ Coverage   │    │ Terminal   │            │
//! │   │ Catalog    │───►│ Aggregator │───►│ Report     │            │
//! │   │ (JSON)     │    │            │    ├────────────┤            │
//! │   └────────────┘    └─────▲──────┘    │ JSON       │            │
//! │                           │           │ Artifact   │            │
//! │               test-completion events  └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use flowcov::{FlowCatalog, FlowCoverageAggregator, ReportRenderer, TestOutcome};
//!
//! let mut aggregator = FlowCoverageAggregator::new(FlowCatalog::empty());
//! aggregator.record_test_completion(
//!     "adds an item to the cart",
//!     &["@flow:shopping-cart-add", "@module:shopping"],
//!     TestOutcome::Passed,
//!     "shopping/shopping-cart.spec.js",
//! );
//!
//! let snapshot = aggregator.finalize();
//! assert_eq!(snapshot.summary().covered, 1);
//! let text = ReportRenderer::new().render_to_string(&snapshot);
//! assert!(text.contains("FLOW COVERAGE REPORT"));
//! ```

#![warn(missing_docs)]

mod aggregator;
pub mod artifact;
pub mod catalog;
mod event;
pub mod playwright;
pub mod render;
mod result;
mod status;
pub mod tag;

pub use aggregator::{
    CoverageSnapshot, CoverageSummary, FlowCoverageAggregator, FlowStats, ModuleCoverage,
    UnmappedTest,
};
pub use artifact::{
    write_artifact, FlowCoverageArtifact, FlowRecord, ARTIFACT_FILE_NAME, DEFAULT_OUTPUT_DIR,
};
pub use catalog::{
    module_grep_args, normalize_module_name, CatalogLoad, FlowCatalog, FlowDefinition, Priority,
};
pub use event::{read_ndjson, TestCompletion, TestOutcome};
pub use render::{CoverageBand, ReportRenderer};
pub use result::{FlowCovError, FlowCovResult};
pub use status::{classify, CoverageStatus, TestCounts};
pub use tag::{FlowTagParser, DEFAULT_FLOW_TAG_PREFIX};
