//! Status lines on stderr
//!
//! The coverage report itself goes to stdout; everything printed here is
//! commentary around it.

use console::{style, Style, Term};
use flowcov::CoverageSummary;

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// Completed step
    Success,
    /// Something degraded but the run continues
    Warning,
    /// Progress note
    Info,
    /// Failure, shown even in quiet mode
    Failure,
}

/// Console-styled status output
#[derive(Debug)]
pub struct Output {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Output {
    /// Create a new status output on stderr
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    fn format_line(&self, kind: LineKind, message: &str) -> String {
        let prefix = if self.use_color {
            match kind {
                LineKind::Success => style("✓").green().bold().to_string(),
                LineKind::Warning => style("⚠").yellow().bold().to_string(),
                LineKind::Info => style("ℹ").blue().bold().to_string(),
                LineKind::Failure => style("✗").red().bold().to_string(),
            }
        } else {
            match kind {
                LineKind::Success => "OK".to_string(),
                LineKind::Warning => "WARN".to_string(),
                LineKind::Info => "INFO".to_string(),
                LineKind::Failure => "FAIL".to_string(),
            }
        };
        format!("{prefix} {message}")
    }

    fn emit(&self, kind: LineKind, message: &str) {
        if self.quiet && kind != LineKind::Failure {
            return;
        }
        let _ = self.term.write_line(&self.format_line(kind, message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.emit(LineKind::Success, message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        self.emit(LineKind::Warning, message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        self.emit(LineKind::Info, message);
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        self.emit(LineKind::Failure, message);
    }

    /// One-line verdict for a finished report
    #[must_use]
    pub fn format_summary(&self, summary: &CoverageSummary) -> String {
        let verdict = if summary.failing > 0 { "FAILING" } else { "DONE" };
        if self.use_color {
            let verdict_style = if summary.failing > 0 {
                Style::new().red().bold()
            } else {
                Style::new().green().bold()
            };
            format!(
                "{} {} flows ({} covered, {} partial, {} failing, {} missing)",
                verdict_style.apply_to(verdict),
                summary.total,
                style(summary.covered).green(),
                style(summary.partial).yellow(),
                style(summary.failing).red(),
                style(summary.missing).dim(),
            )
        } else {
            format!(
                "{verdict} {} flows ({} covered, {} partial, {} failing, {} missing)",
                summary.total, summary.covered, summary.partial, summary.failing, summary.missing
            )
        }
    }

    /// Print the verdict line; suppressed in quiet mode unless flows fail
    pub fn summary(&self, summary: &CoverageSummary) {
        if self.quiet && summary.failing == 0 {
            return;
        }
        let _ = self.term.write_line(&self.format_summary(summary));
    }
}
