//! Human-readable run summaries.
//!
//! Pure formatting over [`RunSummary`]; the only side effect is
//! emitting through the tracing sink.

use std::fmt::Write as _;

use itertools::Itertools;
use tracing::{info, warn};

use crate::types::RunSummary;

/// Render the tabular summary of a run.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ssm-publish summary");
    let _ = writeln!(out, "{}", row("created", &summary.created));
    let _ = writeln!(out, "{}", row("updated", &summary.updated));
    let _ = writeln!(out, "{}", row("unchanged", &summary.unchanged));

    let failed_paths = summary
        .failed
        .iter()
        .map(|f| format!("{} ({})", f.path, f.reason))
        .collect_vec();
    let _ = write!(out, "{}", row("failed", &failed_paths));
    out
}

fn row(label: &str, paths: &[String]) -> String {
    if paths.is_empty() {
        format!("  {label:<10} 0")
    } else {
        format!("  {label:<10} {:<3} {}", paths.len(), paths.iter().join(", "))
    }
}

/// Log the summary through the tracing sink.
///
/// Failed writes are warnings so they stand out even when info-level
/// output is filtered.
pub fn log_summary(summary: &RunSummary) {
    info!(
        created = summary.created.len(),
        updated = summary.updated.len(),
        unchanged = summary.unchanged.len(),
        failed = summary.failed.len(),
        "Publish run finished"
    );

    for line in render_summary(summary).lines() {
        info!("{line}");
    }

    for failure in &summary.failed {
        warn!(path = %failure.path, reason = %failure.reason, "Write failed");
    }
}
