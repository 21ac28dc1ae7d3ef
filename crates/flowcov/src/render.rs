//! Terminal output for flow coverage.
//!
//! Renders a [`CoverageSnapshot`] as a boxed text report. Sections without
//! content are omitted, except the summary and the module breakdown.

use crate::aggregator::{CoverageSnapshot, ModuleCoverage};
use crate::catalog::Priority;
use crate::status::CoverageStatus;
use std::io::{self, Write};

/// Width of the module progress bars
pub const PROGRESS_BAR_WIDTH: usize = 20;

/// Maximum number of files listed in the unmapped-test section
pub const MAX_UNMAPPED_FILES: usize = 15;

const RULE_WIDTH: usize = 50;
const FOOTER_WIDTH: usize = 68;
const MODULE_COLUMN: usize = 18;

/// ANSI escape codes for terminal output
pub mod ansi {
    /// Reset all attributes
    pub const RESET: &str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &str = "\x1b[1m";
    /// Dim text
    pub const DIM: &str = "\x1b[2m";
    /// Red
    pub const RED: &str = "\x1b[31m";
    /// Green
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow
    pub const YELLOW: &str = "\x1b[33m";
    /// Bright green
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    /// 256-color orange
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Gray
    pub const GRAY: &str = "\x1b[90m";
}

/// Severity band of a module's covered percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    /// 80% and above
    Excellent,
    /// 60% to 79%
    Good,
    /// 40% to 59%
    Fair,
    /// 20% to 39%
    Poor,
    /// Below 20%
    Critical,
}

impl CoverageBand {
    /// Band for a whole-number percentage
    #[must_use]
    pub const fn from_percent(pct: u32) -> Self {
        if pct >= 80 {
            Self::Excellent
        } else if pct >= 60 {
            Self::Good
        } else if pct >= 40 {
            Self::Fair
        } else if pct >= 20 {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Excellent => ansi::BRIGHT_GREEN,
            Self::Good => ansi::GREEN,
            Self::Fair => ansi::YELLOW,
            Self::Poor => ansi::ORANGE,
            Self::Critical => ansi::RED,
        }
    }
}

/// `[████░░░░]` bar of `width` cells filled by `value / max`
#[must_use]
pub fn progress_bar(value: usize, max: usize, width: usize) -> String {
    let ratio = if max > 0 {
        value as f64 / max as f64
    } else {
        0.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Last two path segments of a spec file
#[must_use]
pub fn short_file(file: &str) -> String {
    let segments: Vec<&str> = file.split('/').collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].join("/")
}

/// Round to one decimal place with ties away from zero, so 6.25 shows as 6.3
fn round_half_up_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

const fn priority_marker(priority: Priority) -> (&'static str, &'static str) {
    match priority {
        Priority::P1 => ("🔴", ansi::RED),
        Priority::P2 => ("🟠", ansi::ORANGE),
        Priority::P3 => ("🟡", ansi::YELLOW),
        Priority::P4 => ("⚪", ansi::GRAY),
    }
}

/// Renders the flow coverage report
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    color: bool,
    artifact_path: Option<String>,
}

impl ReportRenderer {
    /// Renderer without color
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ANSI color
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Name the JSON artifact in the footer
    #[must_use]
    pub fn with_artifact_path(mut self, path: impl Into<String>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn heading(&self, out: &mut impl Write, title: &str) -> io::Result<()> {
        writeln!(out, "{}", self.paint(ansi::BOLD, title))?;
        writeln!(out, "{}", self.paint(ansi::DIM, &"─".repeat(RULE_WIDTH)))
    }

    /// Render into a string
    #[must_use]
    pub fn render_to_string(&self, snapshot: &CoverageSnapshot) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.render(snapshot, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Render the full report into `out`
    pub fn render(&self, snapshot: &CoverageSnapshot, out: &mut impl Write) -> io::Result<()> {
        self.render_banner(out)?;
        self.render_summary(snapshot, out)?;
        self.render_missing(snapshot, out)?;
        self.render_failing(snapshot, out)?;
        self.render_partial(snapshot, out)?;
        self.render_modules(&snapshot.module_rollup(), out)?;
        self.render_unmapped(snapshot, out)?;
        self.render_footer(out)
    }

    fn render_banner(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            self.paint(
                ansi::BOLD,
                "╔══════════════════════════════════════════════════════════════════╗"
            )
        )?;
        writeln!(
            out,
            "{}",
            self.paint(
                ansi::BOLD,
                "║                      FLOW COVERAGE REPORT                        ║"
            )
        )?;
        writeln!(
            out,
            "{}",
            self.paint(
                ansi::BOLD,
                "╚══════════════════════════════════════════════════════════════════╝"
            )
        )?;
        writeln!(out)
    }

    fn render_summary(&self, snapshot: &CoverageSnapshot, out: &mut impl Write) -> io::Result<()> {
        let summary = snapshot.summary();
        self.heading(out, "📊 SUMMARY")?;
        writeln!(
            out,
            "   Total Flows Defined:  {}",
            self.paint(ansi::BOLD, &summary.total.to_string())
        )?;
        for status in CoverageStatus::ALL {
            let (label, code) = match status {
                CoverageStatus::Covered => ("✅ Covered:", ansi::GREEN),
                CoverageStatus::Partial => ("⚠️  Partial:", ansi::YELLOW),
                CoverageStatus::Failing => ("❌ Failing:", ansi::RED),
                CoverageStatus::Missing => ("⬜ Missing:", ansi::GRAY),
            };
            writeln!(
                out,
                "   {}{:width$} {} ({:.1}%)",
                self.paint(code, label),
                "",
                summary.count(status),
                round_half_up_tenths(summary.percent_of(status)),
                width = 20_usize.saturating_sub(label.chars().count()),
            )?;
        }
        writeln!(out)
    }

    fn render_missing(&self, snapshot: &CoverageSnapshot, out: &mut impl Write) -> io::Result<()> {
        let groups = snapshot.missing_by_priority();
        if groups.is_empty() {
            return Ok(());
        }
        self.heading(out, "🚨 MISSING FLOWS BY PRIORITY")?;
        for (priority, flows) in groups {
            let (marker, code) = priority_marker(priority);
            let line = format!("{marker} {priority} ({}): {}", priority.label(), flows.len());
            writeln!(out, "   {}", self.paint(code, &line))?;
            for flow in flows {
                writeln!(
                    out,
                    "      {} {}: {}",
                    self.paint(ansi::DIM, "-"),
                    flow.flow_id,
                    flow.definition.name
                )?;
            }
        }
        writeln!(out)
    }

    fn render_failing(&self, snapshot: &CoverageSnapshot, out: &mut impl Write) -> io::Result<()> {
        let mut failing = snapshot.with_status(CoverageStatus::Failing).peekable();
        if failing.peek().is_none() {
            return Ok(());
        }
        self.heading(out, "❌ FAILING FLOWS")?;
        for flow in failing {
            writeln!(
                out,
                "   {}: {}/{} failed",
                self.paint(ansi::RED, &flow.flow_id),
                flow.tests.failed,
                flow.tests.total
            )?;
        }
        writeln!(out)
    }

    fn render_partial(&self, snapshot: &CoverageSnapshot, out: &mut impl Write) -> io::Result<()> {
        let mut partial = snapshot.with_status(CoverageStatus::Partial).peekable();
        if partial.peek().is_none() {
            return Ok(());
        }
        self.heading(out, "⚠️  PARTIAL COVERAGE")?;
        for flow in partial {
            writeln!(
                out,
                "   {}: {}% ({}/{})",
                self.paint(ansi::YELLOW, &flow.flow_id),
                flow.tests.pass_percent(),
                flow.tests.passed,
                flow.tests.total
            )?;
            for gap in flow.definition.gaps() {
                writeln!(out, "      {}", self.paint(ansi::DIM, &format!("└─ Gap: {gap}")))?;
            }
        }
        writeln!(out)
    }

    fn render_modules(&self, modules: &[ModuleCoverage], out: &mut impl Write) -> io::Result<()> {
        self.heading(out, "📦 COVERAGE BY MODULE")?;
        for module in modules {
            let pct = module.percent();
            let code = CoverageBand::from_percent(pct).color();
            let bar = progress_bar(module.covered, module.total, PROGRESS_BAR_WIDTH);
            writeln!(
                out,
                "   {:<width$} {} {} ({}/{})",
                module.module,
                self.paint(code, &bar),
                self.paint(code, &format!("{pct}%")),
                module.covered,
                module.total,
                width = MODULE_COLUMN,
            )?;
        }
        writeln!(out)
    }

    fn render_unmapped(&self, snapshot: &CoverageSnapshot, out: &mut impl Write) -> io::Result<()> {
        if snapshot.unmapped.is_empty() {
            return Ok(());
        }
        self.heading(out, "⚠️  TESTS WITHOUT FLOW TAG")?;
        writeln!(
            out,
            "   {} tests are not tagged with a flow",
            snapshot.unmapped.len()
        )?;
        let ranked = snapshot.unmapped_files_ranked();
        for (file, count) in ranked.iter().take(MAX_UNMAPPED_FILES) {
            let line = format!("{}: {count} tests", short_file(file));
            writeln!(out, "      {}", self.paint(ansi::DIM, &line))?;
        }
        if ranked.len() > MAX_UNMAPPED_FILES {
            let line = format!("... and {} more files", ranked.len() - MAX_UNMAPPED_FILES);
            writeln!(out, "      {}", self.paint(ansi::DIM, &line))?;
        }
        writeln!(out)
    }

    fn render_footer(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.paint(ansi::DIM, &"═".repeat(FOOTER_WIDTH)))?;
        if let Some(path) = &self.artifact_path {
            writeln!(
                out,
                "{}",
                self.paint(ansi::GREEN, &format!("  ✅ JSON report: {path}"))
            )?;
        }
        writeln!(out)
    }
}
