//! Patch configuration module.
//!
//! Handles loading, validating, and merging `sitefix.toml`. Every value has a
//! stock default matching the news template the patches were written for, so
//! the config file is optional and sparse: override only what differs.
//!
//! ## Config File Location
//!
//! `sitefix.toml` is looked up in the site root (the `--root` directory), or
//! given explicitly with `--config`:
//!
//! ```text
//! News/
//! ├── sitefix.toml        # Optional patch config
//! ├── index.html
//! ├── markets.html
//! └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [main_tags]
//! files = ["analysis.html", "bonds.html"]   # Pages for `main-tags-list`
//!
//! [layout]
//! exclude = ["index.html", "index-broken-backup.html"]
//!
//! [hero]
//! target = "index.html"
//! start_marker = "<!-- NEW HEADER REDESIGN -->"
//! end_marker = "</section>"
//!
//! [templates]
//! header = "snippets/header.html"          # Relative to the config file
//!
//! [processing]
//! max_processes = 4
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILENAME: &str = "sitefix.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Patch configuration loaded from `sitefix.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// File list for the list-driven `<main>` fix.
    pub main_tags: MainTagsConfig,
    /// Header/footer replacement settings.
    pub layout: LayoutConfig,
    /// Hero section swap settings.
    pub hero: HeroConfig,
    /// Optional replacement snippet files.
    pub templates: TemplatesConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl PatchConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.start_marker.is_empty() || self.hero.end_marker.is_empty() {
            return Err(ConfigError::Validation(
                "hero.start_marker and hero.end_marker must not be empty".into(),
            ));
        }
        if self.hero.target.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hero.target must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        for name in &self.main_tags.files {
            if Path::new(name).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "main_tags.files entries must be relative to the site root: {name}"
                )));
            }
        }
        Ok(())
    }
}

/// Pages patched by the list-driven `<main>` fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MainTagsConfig {
    /// File names relative to the site root, processed in this order.
    pub files: Vec<String>,
}

impl Default for MainTagsConfig {
    fn default() -> Self {
        Self {
            files: [
                "analysis.html",
                "bonds.html",
                "category.html",
                "commodities.html",
                "crypto.html",
                "cryptocurrency.html",
                "economic-policy.html",
                "economy.html",
                "finance.html",
                "forex.html",
                "global-business.html",
                "investing.html",
                "markets.html",
                "stocks-indices.html",
                "stocks.html",
                "tag-economy.html",
                "technology.html",
                "trading.html",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Header/footer replacement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// File names skipped by the layout patch (already on the new design).
    pub exclude: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                "index.html".to_string(),
                "index-broken-backup.html".to_string(),
            ],
        }
    }
}

/// Hero section swap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Page whose hero section is replaced, relative to the site root.
    pub target: String,
    /// Comment that opens the region to replace.
    pub start_marker: String,
    /// First occurrence after the start marker closes the region (inclusive).
    pub end_marker: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            target: "index.html".to_string(),
            start_marker: "<!-- NEW HEADER REDESIGN -->".to_string(),
            end_marker: "</section>".to_string(),
        }
    }
}

/// Override paths for the replacement snippets.
///
/// Relative paths resolve against the directory holding the config file.
/// Unset entries use the snippets built into the binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_script: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<PathBuf>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of files patched concurrently.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(PatchConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `files` array in the user config replaces the stock list.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PatchConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PatchConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config_path`, or stock defaults if it does not exist.
///
/// Relative template override paths are resolved against the config file's
/// directory before returning.
pub fn load_config(config_path: &Path) -> Result<PatchConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(config_path)?;
    let mut config = resolve_config(base, overlay)?;
    if let Some(dir) = config_path.parent() {
        config.templates.resolve_relative_to(dir);
    }
    Ok(config)
}

impl TemplatesConfig {
    fn resolve_relative_to(&mut self, dir: &Path) {
        for slot in [
            &mut self.theme_script,
            &mut self.header,
            &mut self.footer,
            &mut self.hero,
        ] {
            if let Some(path) = slot.as_mut() {
                if path.is_relative() {
                    *path = dir.join(&*path);
                }
            }
        }
    }
}

/// Returns a fully-commented stock `sitefix.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitefix Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the site root as sitefix.toml, or pass --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# List-driven <main> fix (`sitefix main-tags-list`)
# ---------------------------------------------------------------------------
[main_tags]
# Pages to patch, relative to the site root, processed in this order.
files = [
    "analysis.html", "bonds.html", "category.html",
    "commodities.html", "crypto.html", "cryptocurrency.html",
    "economic-policy.html", "economy.html", "finance.html",
    "forex.html", "global-business.html", "investing.html",
    "markets.html", "stocks-indices.html", "stocks.html",
    "tag-economy.html", "technology.html", "trading.html",
]

# ---------------------------------------------------------------------------
# Header / footer replacement (`sitefix layout`)
# ---------------------------------------------------------------------------
[layout]
# Pages left alone because they already carry the new design.
exclude = ["index.html", "index-broken-backup.html"]

# ---------------------------------------------------------------------------
# Hero section swap (`sitefix hero`)
# ---------------------------------------------------------------------------
[hero]
target = "index.html"
# The region from start_marker through the first end_marker after it
# (inclusive) is replaced.
start_marker = "<!-- NEW HEADER REDESIGN -->"
end_marker = "</section>"

# ---------------------------------------------------------------------------
# Replacement snippets
# ---------------------------------------------------------------------------
[templates]
# Override the built-in snippets. Paths are relative to this file.
# theme_script = "snippets/theme-script.html"
# header = "snippets/header.html"
# footer = "snippets/footer.html"
# hero = "snippets/hero.html"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum files patched concurrently.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
