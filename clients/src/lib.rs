//! Shared plumbing for the correctionlib command-line binaries.
//!
//! Logging goes to stderr through `tracing-subscriber`, filtered by
//! `RUST_LOG` (default `correction=info`, `correction=debug` with `-v`).
//! Reports and summaries go to stdout.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use correctionlib_audit::{AuditReport, Severity};
use correctionlib_schema::{Correction, CorrectionSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "correction=debug"
    } else {
        "correction=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Writes `value` as indented JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "written");
    Ok(())
}

/// Per-severity result counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Passed checks.
    pub passed: usize,
    /// Warnings.
    pub warned: usize,
    /// Failed checks.
    pub failed: usize,
}

impl Tally {
    /// Adds another tally to this one.
    pub fn add(&mut self, other: Tally) {
        self.passed += other.passed;
        self.warned += other.warned;
        self.failed += other.failed;
    }
}

/// Renders `report` as `[PASS]`/`[WARN]`/`[FAIL]` lines with indented details.
pub fn render_report(report: &AuditReport, out: &mut String) -> Tally {
    let mut tally = Tally::default();
    for result in &report.results {
        match result.severity {
            Severity::Pass => tally.passed += 1,
            Severity::Warning => tally.warned += 1,
            Severity::Failure => tally.failed += 1,
        }
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            result.severity.label(),
            result.validator,
            result.message
        );
        for detail in &result.details {
            let _ = writeln!(out, "       {detail}");
        }
    }
    tally
}

/// Renders the shape of every correction in `set`.
pub fn render_summary(set: &CorrectionSet) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "schema version {}: {} correction(s)",
        set.schema_version(),
        set.corrections().len()
    );
    for correction in set.corrections() {
        render_correction(correction, &mut out);
    }
    out
}

fn render_correction(correction: &Correction, out: &mut String) {
    let summary = correction.summary();
    let _ = writeln!(out);
    let _ = writeln!(out, "{} (v{})", summary.name, summary.version);
    if let Some(description) = correction.description() {
        let _ = writeln!(out, "  {description}");
    }
    for (i, input) in summary.inputs.iter().enumerate() {
        let _ = writeln!(out, "  input {i}: {} ({})", input.name, input.type_.as_str());
    }
    let _ = writeln!(
        out,
        "  output: {} ({})",
        summary.output.name,
        summary.output.type_.as_str()
    );
    let root = correction.data().nodetype().unwrap_or("value");
    let _ = writeln!(
        out,
        "  tree: {root} root, {} node(s), depth {}",
        summary.node_count, summary.depth
    );
    if !summary.inputs_used.is_empty() {
        let _ = writeln!(out, "  dispatch: {}", summary.inputs_used.join(" -> "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use correctionlib_audit::run_all;
    use correctionlib_test_helpers::{self as helpers, fixtures};

    #[test]
    fn report_lines_and_tally() {
        let set = CorrectionSet::new(vec![helpers::correction(fixtures::TAU_ETF)]);
        let mut out = String::new();
        let tally = render_report(&run_all(&set), &mut out);
        assert_eq!(tally.warned, 1);
        assert_eq!(tally.failed, 0);
        assert!(out.contains("[WARN] references/inputs: 1 dispatch reference(s) do not resolve"));
        assert!(out.contains("       `tau_etf`: dispatches on undeclared input `abseta`"));
    }

    #[test]
    fn summary_describes_tree() {
        let text = render_summary(&helpers::build_test_set());
        assert!(text.starts_with("schema version 1: 3 correction(s)"));
        assert!(text.contains("test_2D (v0)"));
        assert!(text.contains("  input 1: pt (real)"));
        assert!(text.contains("  tree: multibinning root, 5 node(s), depth 2"));
        assert!(text.contains("  dispatch: eta -> pt"));
    }

    #[test]
    fn write_json_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&path, &serde_json::json!({"schema_version": 1})).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"schema_version\": 1"));
    }
}
