//! Command handlers - kept out of main.rs for testability

pub mod catalog;
pub mod report;

pub use catalog::{execute_grep, execute_modules, execute_tags, grep_args_for};
pub use report::{artifact_path, build_snapshot, execute_report, EventSource};
