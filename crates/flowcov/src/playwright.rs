//! Import of Playwright JSON reporter output.
//!
//! Walks the nested suite tree of `results.json` and yields one
//! [`TestCompletion`] per spec and project. Only the fields needed for flow
//! attribution are decoded; everything else in the report is ignored.

use crate::event::{TestCompletion, TestOutcome};
use crate::result::{FlowCovError, FlowCovResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    suites: Vec<Suite>,
}

#[derive(Debug, Deserialize)]
struct Suite {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    specs: Vec<Spec>,
    #[serde(default)]
    suites: Vec<Suite>,
}

#[derive(Debug, Deserialize)]
struct Spec {
    title: String,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    tests: Vec<SpecTest>,
}

#[derive(Debug, Deserialize)]
struct SpecTest {
    #[serde(default)]
    results: Vec<AttemptResult>,
}

#[derive(Debug, Deserialize)]
struct AttemptResult {
    #[serde(default)]
    status: Option<String>,
}

/// Map a Playwright attempt status onto a [`TestOutcome`].
///
/// `interrupted` counts as a failure: the test did not verify its flow.
/// Unrecognized statuses are rejected.
pub fn parse_status(status: &str) -> Option<TestOutcome> {
    match status {
        "passed" => Some(TestOutcome::Passed),
        "failed" | "interrupted" => Some(TestOutcome::Failed),
        "timedOut" => Some(TestOutcome::TimedOut),
        "skipped" => Some(TestOutcome::Skipped),
        _ => None,
    }
}

/// The JSON reporter drops the leading `@` from tags; put it back
fn restore_tag(tag: String) -> String {
    if tag.starts_with('@') {
        tag
    } else {
        format!("@{tag}")
    }
}

fn outcome_of(test: &SpecTest, title: &str) -> FlowCovResult<TestOutcome> {
    // Only the final attempt counts; earlier ones were retried.
    match test.results.last().and_then(|r| r.status.as_deref()) {
        None => Ok(TestOutcome::Skipped),
        Some(status) => parse_status(status).ok_or_else(|| FlowCovError::ResultsImport {
            message: format!("unknown status \"{status}\" for test \"{title}\""),
        }),
    }
}

fn collect(
    suite: &Suite,
    parent_file: Option<&str>,
    events: &mut Vec<TestCompletion>,
) -> FlowCovResult<()> {
    let suite_file = suite.file.as_deref().or(parent_file);
    for spec in &suite.specs {
        let file = spec.file.as_deref().or(suite_file).unwrap_or_default();
        let tags: Vec<String> = spec.tags.iter().cloned().map(restore_tag).collect();
        for test in &spec.tests {
            let outcome = outcome_of(test, &spec.title)?;
            events.push(TestCompletion {
                title: spec.title.clone(),
                tags: tags.clone(),
                outcome,
                file: file.to_string(),
            });
        }
    }
    for child in &suite.suites {
        collect(child, suite_file, events)?;
    }
    Ok(())
}

/// Decode a Playwright JSON report into test-completion events
pub fn events_from_json(json: &str) -> FlowCovResult<Vec<TestCompletion>> {
    let report: Report = serde_json::from_str(json).map_err(|e| FlowCovError::ResultsImport {
        message: e.to_string(),
    })?;
    let mut events = Vec::new();
    for suite in &report.suites {
        collect(suite, None, &mut events)?;
    }
    tracing::debug!(events = events.len(), "imported playwright results");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "config": {"version": "1.48.0"},
        "suites": [
            {
                "title": "auth/auth-login.spec.js",
                "file": "auth/auth-login.spec.js",
                "specs": [],
                "suites": [
                    {
                        "title": "Auth — sign-in page",
                        "file": "auth/auth-login.spec.js",
                        "specs": [
                            {
                                "title": "can sign in with valid credentials",
                                "tags": ["flow:auth-login-email", "module:auth", "priority:P1", "role:shared"],
                                "file": "auth/auth-login.spec.js",
                                "tests": [
                                    {"projectName": "Desktop Chrome", "status": "flaky",
                                     "results": [{"status": "failed", "retry": 0}, {"status": "passed", "retry": 1}]}
                                ]
                            },
                            {
                                "title": "rejects bad password",
                                "tags": ["flow:auth-login-invalid"],
                                "tests": [
                                    {"status": "unexpected", "results": [{"status": "timedOut"}]},
                                    {"status": "unexpected", "results": [{"status": "interrupted"}]}
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "title": "static/static-pages.spec.js",
                "file": "static/static-pages.spec.js",
                "specs": [
                    {"title": "renders about", "tags": [], "tests": [{"status": "skipped", "results": []}]}
                ]
            }
        ],
        "errors": [],
        "stats": {"expected": 1}
    }"#;

    #[test]
    fn test_walks_nested_suites() {
        let events = events_from_json(REPORT).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].title, "can sign in with valid credentials");
        assert_eq!(events[0].file, "auth/auth-login.spec.js");
    }

    #[test]
    fn test_last_attempt_wins() {
        let events = events_from_json(REPORT).unwrap();
        assert_eq!(events[0].outcome, TestOutcome::Passed);
    }

    #[test]
    fn test_status_mapping() {
        let events = events_from_json(REPORT).unwrap();
        assert_eq!(events[1].outcome, TestOutcome::TimedOut);
        assert_eq!(events[2].outcome, TestOutcome::Failed);
        assert_eq!(events[3].outcome, TestOutcome::Skipped);
    }

    #[test]
    fn test_file_inherited_from_suite() {
        let events = events_from_json(REPORT).unwrap();
        assert_eq!(events[1].file, "auth/auth-login.spec.js");
        assert_eq!(events[3].file, "static/static-pages.spec.js");
    }

    #[test]
    fn test_tags_restored() {
        let events = events_from_json(REPORT).unwrap();
        assert_eq!(events[0].tags[0], "@flow:auth-login-email");
        assert_eq!(events[0].tags[3], "@role:shared");
    }

    #[test]
    fn test_unknown_status_is_error() {
        let json = r#"{"suites":[{"file":"a","specs":[{"title":"t","tests":[{"results":[{"status":"exploded"}]}]}]}]}"#;
        assert!(matches!(
            events_from_json(json),
            Err(FlowCovError::ResultsImport { .. })
        ));
    }

    #[test]
    fn test_malformed_report_is_error() {
        assert!(events_from_json("[1, 2").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("passed"), Some(TestOutcome::Passed));
        assert_eq!(parse_status("flaky"), None);
    }
}
