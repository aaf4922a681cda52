//! The patch abstraction shared by every fix.
//!
//! A [`Patch`] is a pure function from document content to an [`Outcome`]:
//! it never touches the filesystem. Reading, writing, and reporting are the
//! [`runner`](crate::runner)'s job, which keeps every patch testable on plain
//! strings.
//!
//! All patches uphold the same contract:
//!
//! - **Idempotent**: applying a patch to its own output yields
//!   [`Outcome::Skipped`].
//! - **Scoped**: content without the target marker is returned untouched,
//!   and content with it changes only where the substitution lands.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("{marker} not found after {after}")]
    MarkerNotFound { marker: String, after: String },
}

/// Why a document was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing to do: the fix is already present or the target is absent.
    NotNeeded(&'static str),
    /// The anchor the patch hangs off is missing, so it cannot be placed.
    MissingAnchor(&'static str),
}

impl SkipReason {
    pub fn detail(&self) -> &'static str {
        match self {
            SkipReason::NotNeeded(d) | SkipReason::MissingAnchor(d) => d,
        }
    }

    /// Whether the skip deserves attention in the report.
    pub fn is_warning(&self) -> bool {
        matches!(self, SkipReason::MissingAnchor(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.detail())
    }
}

/// Result of applying a patch to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Patched(String),
    Skipped(SkipReason),
}

impl Outcome {
    /// Normalize a candidate rewrite: identical content counts as a skip.
    pub fn from_rewrite(original: &str, rewritten: String, unchanged: SkipReason) -> Self {
        if rewritten == original {
            Outcome::Skipped(unchanged)
        } else {
            Outcome::Patched(rewritten)
        }
    }
}

/// A single maintenance fix applied to HTML documents.
pub trait Patch: Sync {
    /// Short identifier used in logs and JSON reports.
    fn name(&self) -> &'static str;

    /// Status text shown when a file was changed.
    fn fixed_message(&self) -> &'static str;

    /// Appended to the `Found N HTML files` line.
    fn found_suffix(&self) -> &'static str {
        ""
    }

    /// Apply the fix to `content`.
    fn apply(&self, content: &str) -> Result<Outcome, PatchError>;
}
