//! Injects the theme-toggle and mobile-menu behaviour into every page.
//!
//! The inline script goes immediately after the bundled `main.min.js` tag,
//! indented to match the surrounding markup.

use crate::patch::{Outcome, Patch, PatchError, SkipReason};

/// The tag every page of the template loads; the script is placed after it.
const MAIN_SCRIPT_TAG: &str = r#"<script src="/js/main.min.js"></script>"#;

/// Present once the stock script has been injected.
const INSTALLED_MARKER: &str = r#"document.getElementById("theme-toggle")"#;

pub struct UiScriptFix {
    script: String,
}

impl UiScriptFix {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Patch for UiScriptFix {
    fn name(&self) -> &'static str {
        "ui-script"
    }

    fn fixed_message(&self) -> &'static str {
        "script added successfully"
    }

    fn apply(&self, content: &str) -> Result<Outcome, PatchError> {
        if content.contains(INSTALLED_MARKER) || content.contains(self.script.as_str()) {
            return Ok(Outcome::Skipped(SkipReason::NotNeeded("already has script")));
        }
        if !content.contains(MAIN_SCRIPT_TAG) {
            return Ok(Outcome::Skipped(SkipReason::MissingAnchor(
                "no main.min.js found",
            )));
        }
        let injected = format!("{MAIN_SCRIPT_TAG}\n  {}", self.script);
        Ok(Outcome::Patched(content.replace(MAIN_SCRIPT_TAG, &injected)))
    }
}
