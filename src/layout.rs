//! Replaces per-page headers and footers with the standard site chrome.
//!
//! Three edits, each independent of the others:
//!
//! 1. **Stylesheet**: link `hero-redesign.css` right after `fnpulse.min.css`.
//! 2. **Header**: everything between each `<body>` (plus a skip-link
//!    directly after it) and the next `<main` becomes the standard ticker,
//!    header, and mobile menu overlay.
//! 3. **Footer**: every `<footer>…</footer>`, together with a directly
//!    following `<nav class="bottom-nav">`, becomes the standard footer.
//!
//! Pages that already carry both the ticker and the new header are skipped
//! outright.

use crate::patch::{Outcome, Patch, PatchError, SkipReason};
use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;

const BASE_STYLESHEET: &str = r#"<link rel="stylesheet" href="/css/fnpulse.min.css">"#;
const HERO_STYLESHEET: &str = r#"<link rel="stylesheet" href="/css/hero-redesign.css">"#;

const TICKER_MARKER: &str = "new-ticker-wrap";
const HEADER_MARKER: &str = "site-header container";

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(<body>.*?(?:<a class="skip-link"[^>]*>.*?</a>)?)(.*?)(<main)"#)
        .expect("static regex")
});

static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<footer[^>]*>.*?</footer>(?:\s*<nav class="bottom-nav".*?</nav>)?"#)
        .expect("static regex")
});

pub struct LayoutUpdate {
    header: String,
    footer: String,
}

impl LayoutUpdate {
    pub fn new(header: impl Into<String>, footer: impl Into<String>) -> Self {
        // The matched footer starts at `<footer`, after the page's own
        // indentation, so the snippet's leading indentation is dropped.
        Self {
            header: header.into(),
            footer: footer.into().trim_start().to_string(),
        }
    }

    fn link_stylesheet(content: &str) -> Option<String> {
        if !content.contains(BASE_STYLESHEET) || content.contains("hero-redesign.css") {
            return None;
        }
        Some(content.replace(
            BASE_STYLESHEET,
            &format!("{BASE_STYLESHEET}\n  {HERO_STYLESHEET}"),
        ))
    }

    fn replace_header(&self, content: &str) -> Option<String> {
        if !HEADER_RE.is_match(content) {
            return None;
        }
        let replaced = HEADER_RE.replace_all(content, |caps: &Captures| {
            format!("{}\n{}\n\n  {}", &caps[1], self.header, &caps[3])
        });
        Some(replaced.into_owned())
    }

    fn replace_footer(&self, content: &str) -> Option<String> {
        if !FOOTER_RE.is_match(content) {
            return None;
        }
        Some(
            FOOTER_RE
                .replace_all(content, NoExpand(self.footer.as_str()))
                .into_owned(),
        )
    }
}

impl Patch for LayoutUpdate {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn fixed_message(&self) -> &'static str {
        "Updated successfully"
    }

    fn found_suffix(&self) -> &'static str {
        " to update"
    }

    fn apply(&self, content: &str) -> Result<Outcome, PatchError> {
        if content.contains(TICKER_MARKER) && content.contains(HEADER_MARKER) {
            return Ok(Outcome::Skipped(SkipReason::NotNeeded(
                "Already using new design",
            )));
        }

        let mut updated = content.to_string();
        if let Some(next) = Self::link_stylesheet(&updated) {
            updated = next;
        }
        if let Some(next) = self.replace_header(&updated) {
            updated = next;
        }
        if let Some(next) = self.replace_footer(&updated) {
            updated = next;
        }

        Ok(Outcome::from_rewrite(
            content,
            updated,
            SkipReason::NotNeeded("no header or footer found"),
        ))
    }
}
