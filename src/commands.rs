//! Maps each CLI command to its patch and target files.

use crate::config::PatchConfig;
use crate::discover::{self, DiscoverError};
use crate::hero::HeroSwap;
use crate::layout::LayoutUpdate;
use crate::main_tag::{MainTagFix, MainTagListFix};
use crate::patch::Patch;
use crate::templates::Templates;
use crate::ui_script::UiScriptFix;
use std::path::{Path, PathBuf};

/// The available patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    MainTags,
    MainTagsList,
    UiScript,
    Hero,
    Layout,
}

/// A patch ready to run plus the files it runs over.
pub struct Plan {
    pub patch: Box<dyn Patch>,
    pub files: Vec<PathBuf>,
}

/// Build the patch for `kind` and enumerate its files under `root`.
pub fn plan(
    kind: PatchKind,
    root: &Path,
    config: &PatchConfig,
    templates: &Templates,
) -> Result<Plan, DiscoverError> {
    let plan = match kind {
        PatchKind::MainTags => Plan {
            patch: Box::new(MainTagFix),
            files: discover::html_files(root, &[])?,
        },
        PatchKind::MainTagsList => Plan {
            patch: Box::new(MainTagListFix),
            files: discover::listed_files(root, &config.main_tags.files)?,
        },
        PatchKind::UiScript => Plan {
            patch: Box::new(UiScriptFix::new(templates.theme_script.clone())),
            files: discover::html_files(root, &[])?,
        },
        PatchKind::Hero => Plan {
            patch: Box::new(HeroSwap::new(&config.hero, templates.hero.clone())),
            files: discover::listed_files(root, std::slice::from_ref(&config.hero.target))?,
        },
        PatchKind::Layout => Plan {
            patch: Box::new(LayoutUpdate::new(
                templates.header.clone(),
                templates.footer.clone(),
            )),
            files: discover::html_files(root, &config.layout.exclude)?,
        },
    };
    tracing::debug!(
        patch = plan.patch.name(),
        files = plan.files.len(),
        root = %root.display(),
        "planned run"
    );
    Ok(plan)
}
