//! Replacement snippets injected by the patches.
//!
//! The stock snippets live in `templates/` and are compiled into the binary,
//! so the tool runs from any directory without shipping extra files. Each one
//! can be swapped for a site-specific file through the `[templates]` config
//! section.

use crate::config::TemplatesConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const THEME_SCRIPT: &str = include_str!("../templates/theme-script.html");
const HEADER: &str = include_str!("../templates/header.html");
const FOOTER: &str = include_str!("../templates/footer.html");
const HERO: &str = include_str!("../templates/hero.html");

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template {0} is empty")]
    Empty(PathBuf),
}

/// The set of snippets used by all patches.
///
/// Trailing newlines are stripped: the patches control the whitespace
/// around each snippet themselves.
#[derive(Debug, Clone)]
pub struct Templates {
    pub theme_script: String,
    pub header: String,
    pub footer: String,
    pub hero: String,
}

impl Templates {
    /// Snippets built into the binary.
    pub fn stock() -> Self {
        Self {
            theme_script: trim_snippet(THEME_SCRIPT),
            header: trim_snippet(HEADER),
            footer: trim_snippet(FOOTER),
            hero: trim_snippet(HERO),
        }
    }

    /// Stock snippets with any configured override files applied.
    pub fn load(config: &TemplatesConfig) -> Result<Self, TemplateError> {
        let mut templates = Self::stock();
        let slots = [
            (&config.theme_script, &mut templates.theme_script),
            (&config.header, &mut templates.header),
            (&config.footer, &mut templates.footer),
            (&config.hero, &mut templates.hero),
        ];
        for (override_path, slot) in slots {
            if let Some(path) = override_path {
                tracing::debug!(path = %path.display(), "loading template override");
                *slot = read_snippet(path)?;
            }
        }
        Ok(templates)
    }
}

fn read_snippet(path: &Path) -> Result<String, TemplateError> {
    let raw = fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snippet = trim_snippet(&raw);
    if snippet.trim().is_empty() {
        return Err(TemplateError::Empty(path.to_path_buf()));
    }
    Ok(snippet)
}

fn trim_snippet(s: &str) -> String {
    s.trim_end_matches(['\r', '\n']).to_string()
}
