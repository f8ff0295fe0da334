//! # Build Configuration
//!
//! This module defines [`BuildConfig`], the in-memory form of a documentation
//! build's settings, and the logic for loading it from an `mkdocs.yml`
//! document and writing it back out in resolved form.
//!
//! ## Loading
//!
//! The document follows the host's conventions:
//!
//! - `theme` is a bare name or a mapping with `name`; absent means `mkdocs`.
//! - `plugins` is a list of names and `{name: options}` items, or a mapping;
//!   absent means the host default (`search`).
//! - `markdown_extensions` is a list of names and `{name: options}` items, or
//!   a mapping. Inline options are collected into
//!   [`BuildConfig::mdx_configs`].
//!
//! Every other top-level key is preserved in [`BuildConfig::extra`].
//!
//! ## Resolved output
//!
//! [`BuildConfig::to_yaml_string`] and [`BuildConfig::to_json_string`] emit
//! the configuration as the host sees it after augmentation, including theme
//! search directories and plugin providers, which have no spelling in
//! `mkdocs.yml`.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::defaults::HOST_DEFAULT_THEME;
use crate::error::{Error, Result};
use crate::merge::get_yaml_type_name;
use crate::plugins::{named_item, options_of, PluginRegistry};
use crate::theme::Theme;

/// Per-extension option mappings, keyed by extension identifier.
pub type MdxConfigs = BTreeMap<String, Mapping>;

/// A documentation build's configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    pub theme: Theme,
    pub plugins: PluginRegistry,
    /// Enabled Markdown extensions, in load order.
    pub markdown_extensions: Vec<String>,
    pub mdx_configs: MdxConfigs,
    /// Top-level keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl BuildConfig {
    /// A configuration with only a site name, as the host would build it
    /// from a minimal `mkdocs.yml`.
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            site_description: None,
            theme: Theme::new(HOST_DEFAULT_THEME),
            plugins: PluginRegistry::host_default(),
            markdown_extensions: Vec::new(),
            mdx_configs: MdxConfigs::new(),
            extra: Mapping::new(),
        }
    }

    /// Parse a configuration document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(content)?;
        let root = match root {
            Value::Mapping(map) => map,
            other => {
                return Err(Error::ConfigParse {
                    message: format!(
                        "Expected a mapping at the document root, found {}",
                        get_yaml_type_name(&other)
                    ),
                    hint: None,
                })
            }
        };

        let site_name = match root.get("site_name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(Error::InvalidValue {
                    key: "site_name".to_string(),
                    expected: "String",
                    found: get_yaml_type_name(other),
                })
            }
            None => {
                return Err(Error::ConfigParse {
                    message: "Missing required key 'site_name'".to_string(),
                    hint: Some("Add 'site_name: <your site>' to the configuration".to_string()),
                })
            }
        };

        let site_description = match root.get("site_description") {
            None | Some(Value::Null) => None,
            Some(Value::String(description)) => Some(description.clone()),
            Some(other) => {
                return Err(Error::InvalidValue {
                    key: "site_description".to_string(),
                    expected: "String",
                    found: get_yaml_type_name(other),
                })
            }
        };

        let theme = Theme::from_value(root.get("theme"))?;
        let plugins = PluginRegistry::from_value(root.get("plugins"))?;

        let mut mdx_configs = match root.get("mdx_configs") {
            None | Some(Value::Null) => MdxConfigs::new(),
            Some(Value::Mapping(map)) => {
                let mut configs = MdxConfigs::new();
                for (name, options) in map {
                    let name = name.as_str().ok_or_else(|| Error::InvalidValue {
                        key: "mdx_configs".to_string(),
                        expected: "String",
                        found: get_yaml_type_name(name),
                    })?;
                    let options = options_of(name, options)?.unwrap_or_default();
                    configs.insert(name.to_string(), options);
                }
                configs
            }
            Some(other) => {
                return Err(Error::InvalidValue {
                    key: "mdx_configs".to_string(),
                    expected: "Mapping",
                    found: get_yaml_type_name(other),
                })
            }
        };
        let markdown_extensions =
            parse_extensions(root.get("markdown_extensions"), &mut mdx_configs)?;

        let mut extra = Mapping::new();
        for (key, value) in root {
            let interpreted = matches!(
                key.as_str(),
                Some(
                    "site_name"
                        | "site_description"
                        | "theme"
                        | "plugins"
                        | "markdown_extensions"
                        | "mdx_configs"
                )
            );
            if !interpreted {
                extra.insert(key, value);
            }
        }

        Ok(Self {
            site_name,
            site_description,
            theme,
            plugins,
            markdown_extensions,
            mdx_configs,
            extra,
        })
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Resolved configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolved configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Collect extension names in order; inline options go to `mdx_configs`.
fn parse_extensions(value: Option<&Value>, mdx_configs: &mut MdxConfigs) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut add = |name: String, options: Option<Mapping>| {
        if let Some(options) = options {
            mdx_configs.insert(name.clone(), options);
        }
        if !names.contains(&name) {
            names.push(name);
        }
    };

    match value {
        None | Some(Value::Null) => {}
        Some(Value::Sequence(items)) => {
            for item in items {
                let (name, options) = named_item("markdown_extensions", item)?;
                add(name, options);
            }
        }
        Some(Value::Mapping(map)) => {
            for (name, options) in map {
                let name = name.as_str().ok_or_else(|| Error::InvalidValue {
                    key: "markdown_extensions".to_string(),
                    expected: "String",
                    found: get_yaml_type_name(name),
                })?;
                add(name.to_string(), options_of(name, options)?);
            }
        }
        Some(other) => {
            return Err(Error::InvalidValue {
                key: "markdown_extensions".to_string(),
                expected: "Sequence or Mapping",
                found: get_yaml_type_name(other),
            })
        }
    }
    Ok(names)
}
