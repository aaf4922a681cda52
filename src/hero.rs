//! Swaps the home page's header and hero block for the redesigned markup.
//!
//! The region to replace runs from the start marker comment through the first
//! end marker that follows it, end marker included. The replacement opens
//! with a different comment (`<!-- HEADER REDESIGN -->`), so once a page has
//! been swapped the start marker is gone and reruns are no-ops.

use crate::config::HeroConfig;
use crate::patch::{Outcome, Patch, PatchError, SkipReason};

pub struct HeroSwap {
    start_marker: String,
    end_marker: String,
    replacement: String,
}

impl HeroSwap {
    pub fn new(config: &HeroConfig, replacement: impl Into<String>) -> Self {
        Self {
            start_marker: config.start_marker.clone(),
            end_marker: config.end_marker.clone(),
            replacement: replacement.into(),
        }
    }
}

impl Patch for HeroSwap {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn fixed_message(&self) -> &'static str {
        "hero section replaced"
    }

    fn apply(&self, content: &str) -> Result<Outcome, PatchError> {
        let Some(start) = content.find(&self.start_marker) else {
            return Ok(Outcome::Skipped(SkipReason::NotNeeded(
                "start marker not found",
            )));
        };
        let end = content[start..]
            .find(&self.end_marker)
            .map(|offset| start + offset + self.end_marker.len())
            .ok_or_else(|| PatchError::MarkerNotFound {
                marker: self.end_marker.clone(),
                after: self.start_marker.clone(),
            })?;

        let mut swapped =
            String::with_capacity(content.len() - (end - start) + self.replacement.len());
        swapped.push_str(&content[..start]);
        swapped.push_str(&self.replacement);
        swapped.push_str(&content[end..]);
        Ok(Outcome::from_rewrite(
            content,
            swapped,
            SkipReason::NotNeeded("hero already up to date"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Templates;

    fn swap(replacement: &str) -> HeroSwap {
        HeroSwap::new(&HeroConfig::default(), replacement)
    }

    #[test]
    fn replaces_through_first_section_close() {
        let page = "<body><!-- NEW HEADER REDESIGN --><header>old</header>\
                    <section>hero</section><section>keep</section></body>";
        let Outcome::Patched(out) = swap("<!-- HEADER REDESIGN -->NEW").apply(page).unwrap() else {
            panic!("expected patch");
        };
        assert_eq!(
            out,
            "<body><!-- HEADER REDESIGN -->NEW<section>keep</section></body>"
        );
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        let page = "<section>a</section><!-- NEW HEADER REDESIGN -->x</section>tail";
        let Outcome::Patched(out) = swap("R").apply(page).unwrap() else {
            panic!("expected patch");
        };
        assert_eq!(out, "<section>a</section>Rtail");
    }

    #[test]
    fn missing_start_marker_skips() {
        let outcome = swap("R").apply("<body></body>").unwrap();
        assert_eq!(
            outcome,
            Outcome::Skipped(SkipReason::NotNeeded("start marker not found"))
        );
    }

    #[test]
    fn missing_end_marker_is_error() {
        let result = swap("R").apply("<!-- NEW HEADER REDESIGN --><div>");
        assert!(matches!(result, Err(PatchError::MarkerNotFound { .. })));
    }

    #[test]
    fn stock_hero_swap_is_idempotent() {
        let hero = Templates::stock().hero;
        let page = "<!-- NEW HEADER REDESIGN --><section></section><footer></footer>";
        let Outcome::Patched(once) = swap(&hero).apply(page).unwrap() else {
            panic!("expected patch");
        };
        assert!(once.starts_with("<!-- HEADER REDESIGN -->"));
        assert!(once.ends_with("<footer></footer>"));
        assert!(matches!(
            swap(&hero).apply(&once).unwrap(),
            Outcome::Skipped(_)
        ));
    }

    #[test]
    fn custom_markers_from_config() {
        let config = HeroConfig {
            target: "home.html".to_string(),
            start_marker: "<!-- BEGIN -->".to_string(),
            end_marker: "<!-- END -->".to_string(),
        };
        let fix = HeroSwap::new(&config, "X");
        let Outcome::Patched(out) = fix.apply("a<!-- BEGIN -->b<!-- END -->c").unwrap() else {
            panic!("expected patch");
        };
        assert_eq!(out, "aXc");
    }
}
