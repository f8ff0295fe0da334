//! Default values for techdocs-core.
//!
//! This module provides centralized default values used by the augmenter and
//! the CLI, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Theme every augmented build is forced onto.
pub const DEFAULT_THEME: &str = "material";

/// Theme the host uses when the configuration names none.
pub const HOST_DEFAULT_THEME: &str = "mkdocs";

/// Name under which this plugin is registered in the host's plugin list.
pub const PLUGIN_NAME: &str = "techdocs-core";

/// Feature flags appended to the theme on every augmentation.
pub const REQUIRED_FEATURES: [&str; 2] = ["navigation.footer", "content.action.edit"];

/// Registry key of the installed search plugin.
pub const SEARCH_PLUGIN_KEY: &str = "search";

/// Registry key of the installed monorepo plugin.
pub const MONOREPO_PLUGIN_KEY: &str = "monorepo";

/// Static templates every theme starts with.
pub const HOST_STATIC_TEMPLATES: [&str; 2] = ["404.html", "sitemap.xml"];

/// Returns the default build configuration path.
///
/// This can be overridden by the `--config` CLI flag or the
/// `TECHDOCS_CONFIG` environment variable.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("mkdocs.yml")
}
