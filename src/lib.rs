//! # sitefix
//!
//! Batch maintenance patches for the static HTML pages of a news-site
//! template. Each patch is a targeted search-and-replace that repairs or
//! upgrades markup across many pages at once.
//!
//! # Architecture: Plan → Patch → Report
//!
//! ```text
//! 1. Plan     command + config  →  patch + file list
//! 2. Patch    file content      →  Outcome (pure, no I/O)
//! 3. Report   per-file status   →  console lines or JSON
//! ```
//!
//! Patches never touch the filesystem; the runner does all reading and
//! writing. That keeps each fix a plain `&str → Outcome` function, so tests
//! exercise the substitution logic on strings and the runner's failure
//! handling on temp directories, independently.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`commands`] | Maps a CLI command to its patch and target files |
//! | [`patch`] | The [`patch::Patch`] trait and [`patch::Outcome`] |
//! | [`main_tag`] | Repairs the malformed `<main>` archive tag (two variants) |
//! | [`ui_script`] | Injects the theme-toggle / mobile-menu script |
//! | [`hero`] | Swaps the home page header and hero block |
//! | [`layout`] | Replaces headers and footers with the standard chrome |
//! | [`discover`] | Enumerates target pages |
//! | [`runner`] | Per-file read → patch → atomic write loop |
//! | [`output`] | Console report formatting |
//! | [`config`] | `sitefix.toml` loading, merging, and validation |
//! | [`templates`] | Built-in and overridable replacement snippets |
//!
//! # Guarantees
//!
//! - **Idempotent**: every patch checks for its own output first, so running
//!   it twice is the same as running it once.
//! - **Scoped**: a page without the target marker is left byte-for-byte
//!   unchanged, and a page with it changes only where the substitution lands.
//! - **Isolated failures**: an unreadable page, invalid UTF-8, or a failed
//!   write is reported against that page and the run continues.
//! - **Accounted**: fixed + skipped + failed always equals the number of
//!   pages discovered.

pub mod commands;
pub mod config;
pub mod discover;
pub mod hero;
pub mod layout;
pub mod main_tag;
pub mod output;
pub mod patch;
pub mod runner;
pub mod templates;
pub mod ui_script;

#[cfg(test)]
pub(crate) mod test_helpers;
