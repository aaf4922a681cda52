//! Target file enumeration.
//!
//! Two ways to pick the pages a patch runs over:
//!
//! - [`html_files`]: every `*.html` directly inside the site root (no
//!   recursion), sorted by path, minus an exclusion list of file names.
//!   Symlinked pages count; hidden (dot) files do not.
//! - [`listed_files`]: an explicit list of names joined onto the root, kept in
//!   list order. Missing entries are returned as-is so the run reports them
//!   as failures instead of silently dropping them.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("site root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// All `*.html` files directly in `root`, sorted, skipping names in `exclude`.
pub fn html_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || !is_html(entry.path()) || !entry.path().is_file() {
            continue;
        }
        if exclude.iter().any(|e| e.as_str() == name.as_ref()) {
            tracing::debug!(file = %name, "excluded");
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort();
    Ok(files)
}

/// `names` joined onto `root`, in the given order.
pub fn listed_files(root: &Path, names: &[String]) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(root.to_path_buf()));
    }
    Ok(names.iter().map(|name| root.join(name)).collect())
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{file_names, write_site};
    use tempfile::TempDir;

    #[test]
    fn html_files_sorted_and_filtered() {
        let tmp = write_site(&[
            ("markets.html", ""),
            ("about.html", ""),
            ("style.css", ""),
            ("notes.htm", ""),
        ]);
        let files = html_files(tmp.path(), &[]).unwrap();
        assert_eq!(file_names(&files), vec!["about.html", "markets.html"]);
    }

    #[test]
    fn html_files_not_recursive() {
        let tmp = write_site(&[("index.html", ""), ("news/article.html", "")]);
        let files = html_files(tmp.path(), &[]).unwrap();
        assert_eq!(file_names(&files), vec!["index.html"]);
    }

    #[test]
    fn html_files_honors_exclusions() {
        let tmp = write_site(&[
            ("index.html", ""),
            ("index-broken-backup.html", ""),
            ("forex.html", ""),
        ]);
        let exclude = vec![
            "index.html".to_string(),
            "index-broken-backup.html".to_string(),
        ];
        let files = html_files(tmp.path(), &exclude).unwrap();
        assert_eq!(file_names(&files), vec!["forex.html"]);
    }

    #[test]
    fn html_files_skips_directories_named_like_pages() {
        let tmp = write_site(&[("real.html", ""), ("fake.html/inner.txt", "")]);
        let files = html_files(tmp.path(), &[]).unwrap();
        assert_eq!(file_names(&files), vec!["real.html"]);
    }

    #[test]
    fn html_files_skips_hidden_pages() {
        let tmp = write_site(&[("real.html", ""), (".draft.html", "")]);
        let files = html_files(tmp.path(), &[]).unwrap();
        assert_eq!(file_names(&files), vec!["real.html"]);
    }

    #[cfg(unix)]
    #[test]
    fn html_files_includes_symlinked_pages() {
        let tmp = write_site(&[("real.html", ""), ("shared/page.html", "")]);
        std::os::unix::fs::symlink(
            tmp.path().join("shared/page.html"),
            tmp.path().join("linked.html"),
        )
        .unwrap();
        let files = html_files(tmp.path(), &[]).unwrap();
        assert_eq!(file_names(&files), vec!["linked.html", "real.html"]);
    }

    #[test]
    fn html_files_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = html_files(&tmp.path().join("News"), &[]);
        assert!(matches!(result, Err(DiscoverError::NotADirectory(_))));
    }

    #[test]
    fn listed_files_keep_order_and_missing_entries() {
        let tmp = write_site(&[("bonds.html", "")]);
        let names = vec!["trading.html".to_string(), "bonds.html".to_string()];
        let files = listed_files(tmp.path(), &names).unwrap();
        assert_eq!(file_names(&files), vec!["trading.html", "bonds.html"]);
        assert!(!files[0].exists());
    }
}
