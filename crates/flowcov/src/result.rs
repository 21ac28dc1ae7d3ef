//! Result and error types for flowcov.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for flowcov operations
pub type FlowCovResult<T> = Result<T, FlowCovError>;

/// Errors that can occur while building a flow coverage report
#[derive(Debug, Error)]
pub enum FlowCovError {
    /// Catalog file exists but could not be read
    #[error("Failed to read flow catalog {}: {source}", path.display())]
    CatalogRead {
        /// Catalog path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Catalog file is not a valid flow catalog
    #[error("Invalid flow catalog {}: {source}", path.display())]
    CatalogParse {
        /// Catalog path
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Module name not declared by any catalog flow
    #[error("Unknown module \"{name}\". Available modules: {available}.")]
    UnknownModule {
        /// Requested module
        name: String,
        /// Comma-separated list of known modules, or `none`
        available: String,
    },

    /// Flow id not declared in the catalog
    #[error("Unknown flow \"{flow_id}\"")]
    UnknownFlow {
        /// Requested flow id
        flow_id: String,
    },

    /// A test-completion event could not be decoded
    #[error("Invalid test event at line {line}: {message}")]
    EventParse {
        /// 1-based line number in the event stream
        line: usize,
        /// Error message
        message: String,
    },

    /// Host runner results could not be imported
    #[error("Invalid runner results: {message}")]
    ResultsImport {
        /// Error message
        message: String,
    },

    /// JSON artifact could not be written
    #[error("Failed to write flow coverage artifact {}: {source}", path.display())]
    ArtifactWrite {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
