//! Test-completion events delivered by the host runner.

use crate::result::{FlowCovError, FlowCovResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead};

/// Final outcome of one test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestOutcome {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test exceeded its timeout
    TimedOut,
    /// Test was skipped
    Skipped,
}

impl TestOutcome {
    /// Timeouts count as failures
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timedOut"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// One completed test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCompletion {
    /// Display title
    pub title: String,
    /// Every tag attached to the test, flow tags or not
    #[serde(default)]
    pub tags: Vec<String>,
    /// Outcome
    pub outcome: TestOutcome,
    /// Originating spec file
    pub file: String,
}

impl TestCompletion {
    /// Create an event
    #[must_use]
    pub fn new(title: impl Into<String>, file: impl Into<String>, outcome: TestOutcome) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            outcome,
            file: file.into(),
        }
    }

    /// Attach a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Attach several tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// Read newline-delimited JSON events; blank lines are skipped
pub fn read_ndjson<R: BufRead>(reader: R) -> FlowCovResult<Vec<TestCompletion>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => FlowCovError::EventParse {
                line: index + 1,
                message: e.to_string(),
            },
            _ => FlowCovError::Io(e),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|e| FlowCovError::EventParse {
            line: index + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}
