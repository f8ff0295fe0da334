//! # TechDocs Core Library
//!
//! This library turns a user's documentation build configuration into the
//! configuration every TechDocs build runs with: the `material` theme, a fixed
//! set of Markdown extensions, the search and monorepo plugins, and a
//! generated `techdocs_metadata.json` template. It is used by the
//! `techdocs-core` command-line tool and can be embedded by any host that
//! loads `mkdocs.yml`-style configurations.
//!
//! ## Quick Example
//!
//! ```
//! use techdocs_core::augment::Augmenter;
//! use techdocs_core::config::BuildConfig;
//!
//! let config = BuildConfig::from_yaml_str(
//!     "site_name: My Docs\nplugins:\n  - techdocs-core\n",
//! )
//! .unwrap();
//!
//! let augmenter = Augmenter::new().unwrap();
//! let config = augmenter.on_config(config).unwrap();
//!
//! assert_eq!(config.theme.name.as_deref(), Some("material"));
//! assert!(!config.plugins.contains("techdocs-core"));
//! assert!(config.plugins.contains("search"));
//! assert!(config.plugins.contains("monorepo"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: [`config::BuildConfig`], loaded from YAML
//!   and written back out in resolved form.
//! - **Theme (`theme`)**: the theme descriptor with its features, palette,
//!   static templates and search directories.
//! - **Plugins (`plugins`)**: the ordered plugin registry and the plugins the
//!   augmenter installs.
//! - **Extensions (`extensions`)**: the default Markdown extensions and the
//!   `pymdownx.extra` option redistribution.
//! - **Merge (`merge`)**: leaf-override merging of option mappings.
//! - **Metadata (`metadata`)**: the theme workspace and the metadata template.
//! - **Augmenter (`augment`)**: runs all of the above once per build.

pub mod augment;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extensions;
pub mod merge;
pub mod metadata;
pub mod plugins;
pub mod theme;

#[cfg(test)]
mod merge_proptest;
