//! Fixes for the malformed `<main>` opening tag on archive pages.
//!
//! A template regression emitted the archive container as plain text:
//!
//! ```text
//! </div></div> id="main-archive" class="container article-container"&gt;
//! ```
//!
//! with the `<main` token missing and the closing bracket HTML-escaped. Both
//! patches restore the opening tag and close it before the footer-adjacent
//! section.
//!
//! - [`MainTagFix`] matches the exact single-space form across every page
//!   and inserts `</main>` before each footer section.
//! - [`MainTagListFix`] tolerates any whitespace before `id=` and only closes
//!   the tag where the section directly follows a `</div>`.

use crate::patch::{Outcome, Patch, PatchError, SkipReason};
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Present only on pages with the broken opening tag.
const BROKEN_MARKER: &str = r#" id="main-archive" class="container article-container"&gt;"#;

const BROKEN_OPENING: &str =
    r#"</div></div> id="main-archive" class="container article-container"&gt;"#;

const FIXED_OPENING: &str =
    r#"</div></div><main id="main-archive" class="container article-container">"#;

const MAIN_OPEN: &str = r#"<main id="main-archive""#;

const FOOTER_SECTION: &str = r#"<section class="container" style="position:relative;z-index:10;margin-bottom:50px;margin-top:50px">"#;

const MAIN_CLOSE: &str = "</main>";

const NO_BROKEN_TAG: SkipReason = SkipReason::NotNeeded("no broken main tag");

static BROKEN_OPENING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"</div></div>\s+id="main-archive" class="container article-container"&gt;"#)
        .expect("static regex")
});

/// Marker-guarded fix applied to every page in the site root.
#[derive(Debug, Default)]
pub struct MainTagFix;

impl Patch for MainTagFix {
    fn name(&self) -> &'static str {
        "main-tags"
    }

    fn fixed_message(&self) -> &'static str {
        "fixed main tag"
    }

    fn apply(&self, content: &str) -> Result<Outcome, PatchError> {
        if !content.contains(BROKEN_MARKER) {
            return Ok(Outcome::Skipped(NO_BROKEN_TAG));
        }
        let mut fixed = content.replace(BROKEN_OPENING, FIXED_OPENING);
        if fixed.contains(MAIN_OPEN) {
            fixed = close_before_footer_sections(&fixed);
        }
        Ok(Outcome::from_rewrite(content, fixed, NO_BROKEN_TAG))
    }
}

/// Insert `</main>` before every footer section not already preceded by one.
fn close_before_footer_sections(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + MAIN_CLOSE.len());
    let mut rest = content;
    while let Some(idx) = rest.find(FOOTER_SECTION) {
        let (before, after) = rest.split_at(idx);
        out.push_str(before);
        if !out.ends_with(MAIN_CLOSE) {
            out.push_str(MAIN_CLOSE);
        }
        out.push_str(FOOTER_SECTION);
        rest = &after[FOOTER_SECTION.len()..];
    }
    out.push_str(rest);
    out
}

/// Whitespace-tolerant fix for the configured list of category pages.
#[derive(Debug, Default)]
pub struct MainTagListFix;

impl Patch for MainTagListFix {
    fn name(&self) -> &'static str {
        "main-tags-list"
    }

    fn fixed_message(&self) -> &'static str {
        "fixed main tag"
    }

    fn apply(&self, content: &str) -> Result<Outcome, PatchError> {
        if !BROKEN_OPENING_RE.is_match(content) {
            return Ok(Outcome::Skipped(NO_BROKEN_TAG));
        }
        let opened = BROKEN_OPENING_RE.replace_all(content, NoExpand(FIXED_OPENING));
        let closed = opened.replace(
            &format!("</div>{FOOTER_SECTION}"),
            &format!("</div>{MAIN_CLOSE}{FOOTER_SECTION}"),
        );
        Ok(Outcome::from_rewrite(content, closed, NO_BROKEN_TAG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken_page(gap: &str) -> String {
        format!(
            "<body><div><div>head</div></div>{gap}id=\"main-archive\" class=\"container article-container\"&gt;\
             <p>articles</p></div>{FOOTER_SECTION}<p>more</p></section></body>"
        )
    }

    fn patched(outcome: Outcome) -> String {
        match outcome {
            Outcome::Patched(s) => s,
            Outcome::Skipped(reason) => panic!("expected patch, got skip: {reason}"),
        }
    }

    // =========================================================================
    // MainTagFix
    // =========================================================================

    #[test]
    fn fix_restores_opening_and_closes_main() {
        let page = broken_page(" ");
        let fixed = patched(MainTagFix.apply(&page).unwrap());
        assert_eq!(
            fixed,
            format!(
                "<body><div><div>head{FIXED_OPENING}<p>articles</p></div></main>{FOOTER_SECTION}\
                 <p>more</p></section></body>"
            )
        );
    }

    #[test]
    fn fix_skips_page_without_marker() {
        let page = "<body><main id=\"x\"></main></body>";
        assert_eq!(
            MainTagFix.apply(page).unwrap(),
            Outcome::Skipped(NO_BROKEN_TAG)
        );
    }

    #[test]
    fn fix_is_idempotent() {
        let once = patched(MainTagFix.apply(&broken_page(" ")).unwrap());
        assert_eq!(
            MainTagFix.apply(&once).unwrap(),
            Outcome::Skipped(NO_BROKEN_TAG)
        );
    }

    #[test]
    fn fix_does_not_double_close() {
        let page = format!(
            "<div></div></div> id=\"main-archive\" class=\"container article-container\"&gt;\
             </main>{FOOTER_SECTION}"
        );
        let fixed = patched(MainTagFix.apply(&page).unwrap());
        assert_eq!(fixed.matches(MAIN_CLOSE).count(), 1);
    }

    #[test]
    fn fix_marker_without_exact_opening_leaves_content() {
        // Marker present, but the doubled space defeats the literal opening.
        let page = broken_page("  ");
        assert_eq!(
            MainTagFix.apply(&page).unwrap(),
            Outcome::Skipped(NO_BROKEN_TAG)
        );
    }

    #[test]
    fn close_inserts_before_each_section() {
        let content = format!("a{FOOTER_SECTION}b{FOOTER_SECTION}");
        let closed = close_before_footer_sections(&content);
        assert_eq!(
            closed,
            format!("a</main>{FOOTER_SECTION}b</main>{FOOTER_SECTION}")
        );
    }

    // =========================================================================
    // MainTagListFix
    // =========================================================================

    #[test]
    fn list_fix_tolerates_whitespace() {
        let page = broken_page("\n      ");
        let fixed = patched(MainTagListFix.apply(&page).unwrap());
        assert!(fixed.contains(FIXED_OPENING));
        assert!(fixed.contains(&format!("</div></main>{FOOTER_SECTION}")));
        assert!(!fixed.contains("&gt;"));
    }

    #[test]
    fn list_fix_requires_whitespace_gap() {
        let page = broken_page("");
        assert_eq!(
            MainTagListFix.apply(&page).unwrap(),
            Outcome::Skipped(NO_BROKEN_TAG)
        );
    }

    #[test]
    fn list_fix_never_closes_without_opening() {
        let page = format!("<main id=\"main-archive\"><div></div>{FOOTER_SECTION}");
        assert_eq!(
            MainTagListFix.apply(&page).unwrap(),
            Outcome::Skipped(NO_BROKEN_TAG)
        );
    }

    #[test]
    fn list_fix_is_idempotent() {
        let once = patched(MainTagListFix.apply(&broken_page(" ")).unwrap());
        assert_eq!(
            MainTagListFix.apply(&once).unwrap(),
            Outcome::Skipped(NO_BROKEN_TAG)
        );
    }

    #[test]
    fn list_fix_preserves_surrounding_content() {
        let page = broken_page(" ");
        let fixed = patched(MainTagListFix.apply(&page).unwrap());
        assert!(fixed.starts_with("<body><div><div>head"));
        assert!(fixed.ends_with("<p>more</p></section></body>"));
    }
}
