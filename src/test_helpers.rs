//! Shared test utilities for the sitefix test suite.
//!
//! Builds throwaway site roots and pulls names and statuses out of run
//! reports so assertions stay one line.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = write_site(&[("markets.html", "<body></body>")]);
//! let files = html_files(tmp.path(), &[]).unwrap();
//! assert_eq!(file_names(&files), vec!["markets.html"]);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::runner::{FileReport, FileStatus};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp site root holding `files` as `(relative path, content)`.
///
/// Parent directories are created as needed.
pub fn write_site(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }
    tmp
}

/// Read a file under `root` as a string. Panics if missing.
pub fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel))
        .unwrap_or_else(|e| panic!("failed to read {rel}: {e}"))
}

// =========================================================================
// Extractors
// =========================================================================

/// File names (last path component) in order.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

/// Find the report for a file name. Panics if not found.
pub fn find_report<'a>(reports: &'a [FileReport], name: &str) -> &'a FileReport {
    reports
        .iter()
        .find(|r| r.path.file_name().is_some_and(|n| n == name))
        .unwrap_or_else(|| {
            let names: Vec<String> = reports
                .iter()
                .map(|r| r.path.display().to_string())
                .collect();
            panic!("report for '{name}' not found. Available: {names:?}")
        })
}

/// Short status label per report, in order: `fixed`, `skipped`, `failed`.
pub fn status_labels(reports: &[FileReport]) -> Vec<&'static str> {
    reports
        .iter()
        .map(|r| match r.status {
            FileStatus::Fixed { .. } => "fixed",
            FileStatus::Skipped { .. } => "skipped",
            FileStatus::Failed { .. } => "failed",
        })
        .collect()
}
