//! Flow Catalog
//!
//! A versioned registry of business flows loaded from `flow-definitions.json`.
//!
//! ```text
//! {
//!   "version": "1.2.0",
//!   "lastUpdated": "2026-03-01",
//!   "flows": {
//!     "auth-login-email": {
//!       "name": "Sign in with email",
//!       "module": "auth",
//!       "roles": ["shared"],
//!       "priority": "P1",
//!       "description": "User signs in with valid credentials",
//!       "expectedSpecs": 2,
//!       "knownGaps": ["Google sign-in is not exercised"]
//!     }
//!   }
//! }
//! ```
//!
//! A missing catalog degrades to an empty one; a malformed catalog is fatal.

use crate::result::{FlowCovError, FlowCovResult};
use crate::tag::{MODULE_TAG_PREFIX, PRIORITY_TAG_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Catalog version reported when no catalog file exists
pub const EMPTY_CATALOG_VERSION: &str = "0.0.0";

/// Module assigned to flows that are not declared in the catalog
pub const UNKNOWN_MODULE: &str = "unknown";

/// Severity tier of a flow, `P1` being the most critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Critical
    P1,
    /// High
    P2,
    /// Medium
    P3,
    /// Low / cosmetic
    P4,
}

impl Priority {
    /// All tiers, most severe first
    pub const ALL: [Self; 4] = [Self::P1, Self::P2, Self::P3, Self::P4];

    /// The least severe tier
    pub const LOWEST: Self = Self::P4;

    /// Human label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::P1 => "Critical",
            Self::P2 => "High",
            Self::P3 => "Medium",
            Self::P4 => "Low",
        }
    }

    /// Tag form, e.g. `P1`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared metadata for one flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDefinition {
    /// Human-readable label
    pub name: String,
    /// Owning functional area
    pub module: String,
    /// Applicable roles or environments
    pub roles: Vec<String>,
    /// Severity tier
    pub priority: Priority,
    /// Free-text description
    pub description: String,
    /// Number of test cases expected to cover this flow (informational)
    pub expected_specs: u32,
    /// Acknowledged coverage holes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_gaps: Option<Vec<String>>,
}

impl FlowDefinition {
    /// Placeholder for a flow tag that the catalog does not declare
    #[must_use]
    pub fn synthesized(flow_id: &str) -> Self {
        Self {
            name: flow_id.to_string(),
            module: UNKNOWN_MODULE.to_string(),
            roles: vec![UNKNOWN_MODULE.to_string()],
            priority: Priority::LOWEST,
            description: "Auto-detected flow (not in definitions)".to_string(),
            expected_specs: 1,
            known_gaps: None,
        }
    }

    /// Known gaps, empty when none are declared
    #[must_use]
    pub fn gaps(&self) -> &[String] {
        self.known_gaps.as_deref().unwrap_or_default()
    }
}

/// The parsed catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowCatalog {
    /// Catalog version
    pub version: String,
    /// Free-form last update marker
    #[serde(default)]
    pub last_updated: String,
    /// Flow definitions keyed by flow id
    #[serde(default)]
    pub flows: BTreeMap<String, FlowDefinition>,
}

impl Default for FlowCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

/// Outcome of [`FlowCatalog::load`]
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    /// The catalog, empty when the file was absent
    pub catalog: FlowCatalog,
    /// Set when the file did not exist
    pub missing: Option<PathBuf>,
}

impl CatalogLoad {
    /// Whether the catalog file was absent
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.missing.is_some()
    }
}

impl FlowCatalog {
    /// Empty catalog used when no file exists
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: EMPTY_CATALOG_VERSION.to_string(),
            last_updated: String::new(),
            flows: BTreeMap::new(),
        }
    }

    /// Parse a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the catalog at `path`.
    ///
    /// An absent file yields an empty catalog and a single warning; any other
    /// read or parse failure is returned as an error naming the file.
    pub fn load(path: &Path) -> FlowCovResult<CatalogLoad> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "flow catalog not found, flow coverage will be limited"
                );
                return Ok(CatalogLoad {
                    catalog: Self::empty(),
                    missing: Some(path.to_path_buf()),
                });
            }
            Err(source) => {
                return Err(FlowCovError::CatalogRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let catalog = Self::from_json(&content).map_err(|source| FlowCovError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            version = %catalog.version,
            flows = catalog.flows.len(),
            "loaded flow catalog"
        );
        Ok(CatalogLoad {
            catalog,
            missing: None,
        })
    }

    /// Load the catalog at `path`, treating an absent file as an error too
    pub fn load_required(path: &Path) -> FlowCovResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| FlowCovError::CatalogRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content).map_err(|source| FlowCovError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of declared flows
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Whether no flows are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Look up a flow definition
    #[must_use]
    pub fn get(&self, flow_id: &str) -> Option<&FlowDefinition> {
        self.flows.get(flow_id)
    }

    /// Distinct, trimmed, non-empty module names in alphabetical order
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        self.flows
            .values()
            .map(|def| def.module.trim())
            .filter(|module| !module.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Check that `module` is declared by at least one flow
    pub fn require_module(&self, module: &str) -> FlowCovResult<()> {
        let modules = self.modules();
        if modules.iter().any(|m| m == module) {
            return Ok(());
        }
        let available = if modules.is_empty() {
            "none".to_string()
        } else {
            modules.join(", ")
        };
        Err(FlowCovError::UnknownModule {
            name: module.to_string(),
            available,
        })
    }

    /// The tag bundle a test covering `flow_id` should carry:
    /// `@flow:<id>`, `@module:<module>`, `@priority:<tier>`
    pub fn tags_for(&self, flow_id: &str, flow_prefix: &str) -> FlowCovResult<Vec<String>> {
        let def = self.get(flow_id).ok_or_else(|| FlowCovError::UnknownFlow {
            flow_id: flow_id.to_string(),
        })?;
        Ok(vec![
            format!("{flow_prefix}{flow_id}"),
            format!("{MODULE_TAG_PREFIX}{}", def.module),
            format!("{PRIORITY_TAG_PREFIX}{}", def.priority),
        ])
    }
}

/// Strip an optional `@module:` prefix and surrounding whitespace
#[must_use]
pub fn normalize_module_name(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix(MODULE_TAG_PREFIX)
        .unwrap_or(trimmed)
        .trim()
}

/// Test runner arguments selecting every test tagged with `module`
#[must_use]
pub fn module_grep_args(module: &str, extra: &[String]) -> Vec<String> {
    let mut args = vec!["--grep".to_string(), format!("{MODULE_TAG_PREFIX}{module}")];
    args.extend(extra.iter().cloned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const CATALOG: &str = r#"{
        "version": "1.2.0",
        "lastUpdated": "2026-03-01",
        "flows": {
            "auth-login-email": {
                "name": "Sign in with email",
                "module": "auth",
                "roles": ["shared"],
                "priority": "P1",
                "description": "User signs in with valid credentials",
                "expectedSpecs": 2
            },
            "blog-list-view": {
                "name": "Blog list",
                "module": " blog ",
                "roles": ["guest"],
                "priority": "P2",
                "description": "Blog index renders",
                "expectedSpecs": 1,
                "knownGaps": ["Pagination not covered", "Empty state not covered"]
            },
            "auth-logout": {
                "name": "Sign out",
                "module": "auth",
                "roles": ["shared"],
                "priority": "P2",
                "description": "User signs out",
                "expectedSpecs": 1
            }
        }
    }"#;

    mod priority_tests {
        use super::*;

        #[test]
        fn test_ordering_is_severity() {
            assert!(Priority::P1 < Priority::P2);
            assert!(Priority::P3 < Priority::P4);
            assert_eq!(Priority::ALL[0], Priority::P1);
        }

        #[test]
        fn test_labels() {
            assert_eq!(Priority::P1.label(), "Critical");
            assert_eq!(Priority::P4.label(), "Low");
            assert_eq!(Priority::P2.to_string(), "P2");
        }

        #[test]
        fn test_rejects_unknown_tier() {
            let json = r#"{"version":"1","flows":{"x":{"name":"x","module":"m","roles":[],
                "priority":"P9","description":"","expectedSpecs":1}}}"#;
            assert!(FlowCatalog::from_json(json).is_err());
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_catalog() {
            let catalog = FlowCatalog::from_json(CATALOG).unwrap();
            assert_eq!(catalog.version, "1.2.0");
            assert_eq!(catalog.last_updated, "2026-03-01");
            assert_eq!(catalog.len(), 3);

            let login = catalog.get("auth-login-email").unwrap();
            assert_eq!(login.priority, Priority::P1);
            assert_eq!(login.expected_specs, 2);
            assert!(login.known_gaps.is_none());
            assert!(login.gaps().is_empty());

            let blog = catalog.get("blog-list-view").unwrap();
            assert_eq!(blog.gaps().len(), 2);
        }

        #[test]
        fn test_missing_required_field_is_error() {
            let json = r#"{"version":"1","flows":{"x":{"name":"x","module":"m"}}}"#;
            assert!(FlowCatalog::from_json(json).is_err());
        }

        #[test]
        fn test_definition_serializes_camel_case() {
            let def = FlowDefinition::synthesized("checkout");
            let value = serde_json::to_value(&def).unwrap();
            assert_eq!(value["expectedSpecs"], 1);
            assert_eq!(value["priority"], "P4");
            assert!(value.get("knownGaps").is_none());
        }

        #[test]
        fn test_synthesized_definition() {
            let def = FlowDefinition::synthesized("checkout");
            assert_eq!(def.name, "checkout");
            assert_eq!(def.module, UNKNOWN_MODULE);
            assert_eq!(def.priority, Priority::P4);
            assert_eq!(def.expected_specs, 1);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_load_missing_file_is_empty() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("flow-definitions.json");
            let load = FlowCatalog::load(&path).unwrap();
            assert!(load.is_missing());
            assert!(load.catalog.is_empty());
            assert_eq!(load.catalog.version, EMPTY_CATALOG_VERSION);
        }

        #[test]
        fn test_load_valid_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(CATALOG.as_bytes()).unwrap();
            let load = FlowCatalog::load(file.path()).unwrap();
            assert!(!load.is_missing());
            assert_eq!(load.catalog.len(), 3);
        }

        #[test]
        fn test_load_malformed_file_is_fatal() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(b"{ \"version\": ").unwrap();
            let err = FlowCatalog::load(file.path()).unwrap_err();
            assert!(matches!(err, FlowCovError::CatalogParse { .. }));
            assert!(err
                .to_string()
                .contains(&file.path().display().to_string()));
        }

        #[test]
        fn test_load_required_missing_file_is_error() {
            let dir = TempDir::new().unwrap();
            let err = FlowCatalog::load_required(&dir.path().join("nope.json")).unwrap_err();
            assert!(matches!(err, FlowCovError::CatalogRead { .. }));
        }
    }

    mod module_tests {
        use super::*;

        #[test]
        fn test_modules_sorted_and_trimmed() {
            let catalog = FlowCatalog::from_json(CATALOG).unwrap();
            assert_eq!(catalog.modules(), vec!["auth", "blog"]);
        }

        #[test]
        fn test_require_module() {
            let catalog = FlowCatalog::from_json(CATALOG).unwrap();
            assert!(catalog.require_module("auth").is_ok());
            let err = catalog.require_module("billing").unwrap_err();
            assert!(err.to_string().contains("auth, blog"));
        }

        #[test]
        fn test_require_module_empty_catalog() {
            let err = FlowCatalog::empty().require_module("auth").unwrap_err();
            assert!(err.to_string().contains("none"));
        }

        #[test]
        fn test_normalize_module_name() {
            assert_eq!(normalize_module_name("auth"), "auth");
            assert_eq!(normalize_module_name("  @module:auth "), "auth");
            assert_eq!(normalize_module_name("@module: blog"), "blog");
        }

        #[test]
        fn test_module_grep_args() {
            let extra = vec!["--project=Desktop Chrome".to_string()];
            assert_eq!(
                module_grep_args("auth", &extra),
                vec!["--grep", "@module:auth", "--project=Desktop Chrome"]
            );
        }
    }

    mod tag_bundle_tests {
        use super::*;

        #[test]
        fn test_tags_for_flow() {
            let catalog = FlowCatalog::from_json(CATALOG).unwrap();
            let tags = catalog.tags_for("auth-logout", "@flow:").unwrap();
            assert_eq!(tags, vec!["@flow:auth-logout", "@module:auth", "@priority:P2"]);
        }

        #[test]
        fn test_tags_for_unknown_flow() {
            let catalog = FlowCatalog::from_json(CATALOG).unwrap();
            assert!(matches!(
                catalog.tags_for("nope", "@flow:"),
                Err(FlowCovError::UnknownFlow { .. })
            ));
        }
    }
}
