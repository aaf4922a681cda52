//! Applies a patch to a set of files and collects per-file reports.
//!
//! Each file is handled on its own: read as UTF-8, patched in memory, and
//! written back only when the content changed. Any failure (missing file,
//! invalid UTF-8, a patch error, a failed write) is recorded against that
//! file and the run moves on. There is no rollback across files.
//!
//! ## Writes
//!
//! Content goes to a temp file in the same directory which is then renamed
//! over the original, so an interrupted write never leaves a truncated page.
//! The original file's permissions are carried over.
//!
//! ## Parallelism
//!
//! Files never interact, so they are processed on the rayon pool. Reports come
//! back in the order the files were given.

use crate::patch::{Outcome, Patch, PatchError, SkipReason};
use rayon::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Patch(#[from] PatchError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Apply patches in memory and report, but leave files untouched.
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Fixed {
        message: &'static str,
        /// False on dry runs.
        written: bool,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
    /// SHA-256 of the content as read. Absent when the read failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_sha256: Option<String>,
    /// SHA-256 of the patched content. Present only for fixed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_sha256: Option<String>,
}

/// Aggregate counts. `fixed + skipped + failed == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fixed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.status {
                FileStatus::Fixed { .. } => summary.fixed += 1,
                FileStatus::Skipped { .. } => summary.skipped += 1,
                FileStatus::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Everything a run produced, in file order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub patch: &'static str,
    /// Console wording for the file count; see [`Patch::found_suffix`].
    #[serde(skip)]
    pub found_suffix: &'static str,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub summary: RunSummary,
}

/// Apply `patch` to every file in `files`.
pub fn run(patch: &dyn Patch, files: &[PathBuf], options: RunOptions) -> RunReport {
    tracing::info!(
        patch = patch.name(),
        files = files.len(),
        dry_run = options.dry_run,
        "starting run"
    );
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| patch_file(patch, path, options))
        .collect();
    let summary = RunSummary::from_reports(&reports);
    tracing::info!(
        patch = patch.name(),
        fixed = summary.fixed,
        skipped = summary.skipped,
        failed = summary.failed,
        "run complete"
    );
    RunReport {
        patch: patch.name(),
        found_suffix: patch.found_suffix(),
        dry_run: options.dry_run,
        files: reports,
        summary,
    }
}

/// Patch one file, turning any error into a `Failed` report.
pub fn patch_file(patch: &dyn Patch, path: &Path, options: RunOptions) -> FileReport {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => return failed(path, None, err.into()),
    };
    let before = content_hash(&content);

    let outcome = match patch.apply(&content) {
        Ok(o) => o,
        Err(err) => return failed(path, Some(before), err.into()),
    };

    match outcome {
        Outcome::Skipped(reason) => {
            tracing::debug!(path = %path.display(), %reason, "skipped");
            FileReport {
                path: path.to_path_buf(),
                status: FileStatus::Skipped { reason },
                before_sha256: Some(before),
                after_sha256: None,
            }
        }
        Outcome::Patched(updated) => {
            if !options.dry_run {
                if let Err(err) = write_atomic(path, &updated) {
                    return failed(path, Some(before), err.into());
                }
            }
            tracing::debug!(path = %path.display(), written = !options.dry_run, "patched");
            FileReport {
                path: path.to_path_buf(),
                status: FileStatus::Fixed {
                    message: patch.fixed_message(),
                    written: !options.dry_run,
                },
                before_sha256: Some(before),
                after_sha256: Some(content_hash(&updated)),
            }
        }
    }
}

fn failed(path: &Path, before: Option<String>, err: RunError) -> FileReport {
    tracing::warn!(path = %path.display(), error = %err, "file failed");
    FileReport {
        path: path.to_path_buf(),
        status: FileStatus::Failed {
            error: err.to_string(),
        },
        before_sha256: before,
        after_sha256: None,
    }
}

/// SHA-256 of a string's bytes, returned as a hex string.
pub fn content_hash(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// Replace `path` with `content` via a sibling temp file and rename.
///
/// Symlinks are resolved first, so the link stays and its target is replaced.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target)?.permissions();
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
