//! # Configuration Augmenter
//!
//! The [`Augmenter`] runs once per build at configuration time. It takes the
//! user's [`BuildConfig`] by value and returns the configuration the build
//! should actually run with:
//!
//! 1. the metadata template is written into the augmenter's theme workspace,
//! 2. core extension options are merged in, core winning at every leaf,
//! 3. the theme is forced to `material`, given the required feature flags,
//!    stripped of its palette and pointed at the workspace,
//! 4. this plugin's registry entry is replaced by a search plugin and the
//!    monorepo plugin,
//! 5. the default Markdown extensions are enabled with their options,
//! 6. `pymdownx.extra` sub-extension options are moved under that namespace.
//!
//! The workspace lives as long as the augmenter. Keep the augmenter (or the
//! workspace returned by [`Augmenter::into_workspace`]) alive until the host
//! has finished building.

use log::{debug, info};
use serde_yaml::{Mapping, Value};

use crate::config::{BuildConfig, MdxConfigs};
use crate::defaults::{
    DEFAULT_THEME, MONOREPO_PLUGIN_KEY, PLUGIN_NAME, REQUIRED_FEATURES, SEARCH_PLUGIN_KEY,
};
use crate::error::Result;
use crate::extensions::{merge_default_extensions, redistribute_extra_configs};
use crate::merge::merge_core_into_mdx;
use crate::metadata::{ThemeWorkspace, METADATA_FILE_NAME};
use crate::plugins::{PluginEntry, SearchVariant, TechDocsOptions};
use crate::theme::Theme;

/// Extension options that take precedence over anything the user sets.
pub fn core_configs() -> MdxConfigs {
    let mut snippets = Mapping::new();
    snippets.insert(Value::from("restrict_base_path"), Value::Bool(true));

    let mut core = MdxConfigs::new();
    core.insert("pymdownx.snippets".to_string(), snippets);
    core
}

/// Rewrites a build configuration into the shape every TechDocs build uses
#[derive(Debug)]
pub struct Augmenter {
    workspace: ThemeWorkspace,
}

impl Augmenter {
    /// Create an augmenter with a fresh temporary theme workspace.
    pub fn new() -> Result<Self> {
        Ok(Self::with_workspace(ThemeWorkspace::temporary()?))
    }

    pub fn with_workspace(workspace: ThemeWorkspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &ThemeWorkspace {
        &self.workspace
    }

    pub fn into_workspace(self) -> ThemeWorkspace {
        self.workspace
    }

    /// Augment `config` for the build.
    ///
    /// Fails only when the metadata file cannot be written or this plugin's
    /// own options are malformed.
    pub fn on_config(&self, mut config: BuildConfig) -> Result<BuildConfig> {
        self.workspace.write_metadata()?;

        merge_core_into_mdx(&core_configs(), &mut config.mdx_configs);

        self.apply_theme(&mut config);
        install_plugins(&mut config)?;

        merge_default_extensions(&mut config.markdown_extensions, &mut config.mdx_configs);
        redistribute_extra_configs(&mut config.mdx_configs);

        debug!(
            "Augmented '{}': {} extensions, plugins {:?}",
            config.site_name,
            config.markdown_extensions.len(),
            config.plugins.names()
        );
        Ok(config)
    }

    fn apply_theme(&self, config: &mut BuildConfig) {
        if config.theme.name.as_deref() != Some(DEFAULT_THEME) {
            debug!(
                "Replacing theme {:?} with '{}'",
                config.theme.name, DEFAULT_THEME
            );
            config.theme = Theme::new(DEFAULT_THEME);
        } else {
            info!("Overridden '{}' theme settings in use", DEFAULT_THEME);
        }

        let theme = &mut config.theme;
        let features = theme.features_mut();
        features.extend(REQUIRED_FEATURES.iter().map(|f| f.to_string()));
        theme.palette = Some(Value::Mapping(Mapping::new()));
        theme.static_templates.insert(METADATA_FILE_NAME.to_string());
        theme.dirs.push(self.workspace.path().to_path_buf());
    }
}

/// Swap this plugin's registry entry for the search and monorepo plugins.
fn install_plugins(config: &mut BuildConfig) -> Result<()> {
    let options = match config.plugins.get(PLUGIN_NAME) {
        Some(entry) => TechDocsOptions::from_options(entry.config())?,
        None => {
            debug!("'{}' is not registered, using default options", PLUGIN_NAME);
            TechDocsOptions::default()
        }
    };
    config.plugins.remove(PLUGIN_NAME);

    let variant = SearchVariant::from_material_flag(options.use_material_search);
    debug!("Installing {:?} search", variant);
    config
        .plugins
        .insert(SEARCH_PLUGIN_KEY, PluginEntry::search(variant)?);
    config
        .plugins
        .insert(MONOREPO_PLUGIN_KEY, PluginEntry::monorepo()?);
    Ok(())
}
