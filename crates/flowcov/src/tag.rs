//! Structured test tags.
//!
//! Tests carry free-text tags; a few reserved prefixes give them structure:
//! `@flow:<id>` links a test to a catalog flow, `@module:` and `@priority:`
//! mirror the flow's metadata for filtering in the runner.

use std::collections::BTreeSet;

/// Default prefix marking a flow tag
pub const DEFAULT_FLOW_TAG_PREFIX: &str = "@flow:";

/// Prefix marking a module tag
pub const MODULE_TAG_PREFIX: &str = "@module:";

/// Prefix marking a priority tag
pub const PRIORITY_TAG_PREFIX: &str = "@priority:";

/// Extracts flow ids from test tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTagParser {
    prefix: String,
}

impl Default for FlowTagParser {
    fn default() -> Self {
        Self::new(DEFAULT_FLOW_TAG_PREFIX)
    }
}

impl FlowTagParser {
    /// Parser for a custom flow-tag prefix
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The flow-tag prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Flow id carried by `tag`, if it is a flow tag.
    ///
    /// No grammar is imposed on the id; only an empty id is rejected.
    #[must_use]
    pub fn parse<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Distinct flow ids across `tags`
    #[must_use]
    pub fn flow_ids<'a, S: AsRef<str>>(&self, tags: &'a [S]) -> BTreeSet<&'a str> {
        tags.iter().filter_map(|tag| self.parse(tag.as_ref())).collect()
    }
}
