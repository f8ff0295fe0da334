//! # Theme Descriptor
//!
//! The active visual theme of a build: its name, the feature flags it is
//! asked to enable, its color palette, the templates copied verbatim into the
//! build output, and the directories searched for templates.
//!
//! A theme is written in the build configuration either as a bare name
//! (`theme: material`) or as a mapping with a `name` key and arbitrary theme
//! options. `features`, `palette` and `custom_dir` are lifted into typed
//! fields; every other key is kept in [`Theme::options`].

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::defaults::{HOST_DEFAULT_THEME, HOST_STATIC_TEMPLATES};
use crate::error::{Error, Result};
use crate::merge::get_yaml_type_name;

/// The theme section of a build configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    /// Theme name, e.g. `material`. `None` for a theme made only of a
    /// `custom_dir`.
    pub name: Option<String>,
    /// Feature flags. `None` when the configuration never mentioned any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// Color palette, a mapping or a list of mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Value>,
    /// Templates rendered and copied into the output as-is.
    pub static_templates: BTreeSet<String>,
    /// Template search directories, highest priority first.
    pub dirs: Vec<PathBuf>,
    /// Remaining theme options.
    #[serde(flatten)]
    pub options: Mapping,
}

impl Theme {
    /// Construct a theme with no user customisation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            features: None,
            palette: None,
            static_templates: HOST_STATIC_TEMPLATES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            dirs: Vec::new(),
            options: Mapping::new(),
        }
    }

    /// Build a theme from the `theme` value of a configuration document.
    ///
    /// `None` (key absent) yields the host's default theme.
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        let value = match value {
            None | Some(Value::Null) => return Ok(Self::new(HOST_DEFAULT_THEME)),
            Some(value) => value,
        };

        let map = match value {
            Value::String(name) => return Ok(Self::new(name.as_str())),
            Value::Mapping(map) => map,
            other => {
                return Err(Error::InvalidValue {
                    key: "theme".to_string(),
                    expected: "String or Mapping",
                    found: get_yaml_type_name(other),
                })
            }
        };

        let name = match map.get("name") {
            Some(Value::String(name)) => Some(name.clone()),
            Some(Value::Null) if map.contains_key("custom_dir") => None,
            Some(Value::Null) => {
                return Err(Error::ConfigParse {
                    message: "Theme has neither 'name' nor 'custom_dir'".to_string(),
                    hint: Some("Set 'name' or 'custom_dir' in the theme block".to_string()),
                })
            }
            Some(other) => {
                return Err(Error::InvalidValue {
                    key: "theme.name".to_string(),
                    expected: "String",
                    found: get_yaml_type_name(other),
                })
            }
            None => {
                return Err(Error::ConfigParse {
                    message: "Theme mapping has no 'name'".to_string(),
                    hint: Some("Add 'name: material' to the theme block".to_string()),
                })
            }
        };

        let mut theme = Self::new(HOST_DEFAULT_THEME);
        theme.name = name;
        for (key, value) in map {
            match key.as_str() {
                Some("name") => {}
                Some("features") => theme.features = Some(string_list("theme.features", value)?),
                Some("palette") => theme.palette = Some(value.clone()),
                Some("static_templates") => theme
                    .static_templates
                    .extend(string_list("theme.static_templates", value)?),
                Some("custom_dir") => {
                    let dir = value.as_str().ok_or_else(|| Error::InvalidValue {
                        key: "theme.custom_dir".to_string(),
                        expected: "String",
                        found: get_yaml_type_name(value),
                    })?;
                    theme.dirs.push(PathBuf::from(dir));
                    theme.options.insert(key.clone(), value.clone());
                }
                _ => {
                    theme.options.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(theme)
    }

    /// Feature list, created empty when absent.
    pub fn features_mut(&mut self) -> &mut Vec<String> {
        self.features.get_or_insert_with(Vec::new)
    }
}

fn string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    let seq = value.as_sequence().ok_or_else(|| Error::InvalidValue {
        key: key.to_string(),
        expected: "Sequence",
        found: get_yaml_type_name(value),
    })?;
    seq.iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| Error::InvalidValue {
                key: key.to_string(),
                expected: "String",
                found: get_yaml_type_name(item),
            })
        })
        .collect()
}
