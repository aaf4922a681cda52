//! CLI output formatting for patch runs.
//!
//! # Output Format
//!
//! ```text
//! Found 3 HTML files
//!
//! ✓ bonds.html - fixed main tag
//! ✓ index.html - no broken main tag, skipping
//! ⚠ print.html - no main.min.js found, skipping
//! ✗ stocks.html - Error: stream did not contain valid UTF-8
//!
//! ============================================================
//! Summary:
//!   Fixed: 1
//!   Skipped: 2
//!   Failed: 1
//!   Total: 4
//! ============================================================
//! ```
//!
//! Files are shown by name only; the site root is implied by the invocation.
//! Dry runs tag each fix with `(dry run)` and say so in the summary title.
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` (or `String`) and do no I/O;
//! `print_*` wrappers write them to stdout.

use crate::runner::{FileReport, FileStatus, RunReport, RunSummary};

const RULE_WIDTH: usize = 60;

/// File name for display, falling back to the full path.
fn display_name(report: &FileReport) -> String {
    report
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.path.display().to_string())
}

/// `Found N HTML files` with the noun pluralized, then the patch's suffix.
pub fn format_found(count: usize, suffix: &str) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!("Found {count} HTML {noun}{suffix}")
}

/// One status line for a processed file.
pub fn format_file_line(report: &FileReport) -> String {
    let name = display_name(report);
    match &report.status {
        FileStatus::Fixed { message, written } => {
            let suffix = if *written { "" } else { " (dry run)" };
            format!("✓ {name} - {message}{suffix}")
        }
        FileStatus::Skipped { reason } => {
            let icon = if reason.is_warning() { "⚠" } else { "✓" };
            format!("{icon} {name} - {reason}, skipping")
        }
        FileStatus::Failed { error } => format!("✗ {name} - Error: {error}"),
    }
}

/// The framed summary block.
pub fn format_summary(summary: &RunSummary, dry_run: bool) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let title = if dry_run {
        "Summary (dry run, no files written):"
    } else {
        "Summary:"
    };
    vec![
        rule.clone(),
        title.to_string(),
        format!("  Fixed: {}", summary.fixed),
        format!("  Skipped: {}", summary.skipped),
        format!("  Failed: {}", summary.failed),
        format!("  Total: {}", summary.total),
        rule,
    ]
}

/// Full run output: count, per-file lines, summary.
pub fn format_run(report: &RunReport) -> Vec<String> {
    let mut lines = vec![
        format_found(report.summary.total, report.found_suffix),
        String::new(),
    ];
    lines.extend(report.files.iter().map(format_file_line));
    lines.push(String::new());
    lines.extend(format_summary(&report.summary, report.dry_run));
    lines
}

/// Print run output to stdout.
pub fn print_run(report: &RunReport) {
    for line in format_run(report) {
        println!("{}", line);
    }
}

/// Print the run report as pretty JSON to stdout.
pub fn print_run_json(report: &RunReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
