//! # Plugin Registry
//!
//! The host keeps its plugins in an ordered registry keyed by name. Entries
//! written by the user in the configuration are kept as [`PluginKind::Declared`]
//! with their raw options. The augmenter installs concrete plugins
//! ([`PluginKind::Search`], [`PluginKind::MaterialSearch`],
//! [`PluginKind::Monorepo`]) whose options are loaded over their defaults.
//!
//! The augmenter's own options live in the registry too, under
//! [`PLUGIN_NAME`](crate::defaults::PLUGIN_NAME), and are read through
//! [`TechDocsOptions`].

use log::warn;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::defaults::{PLUGIN_NAME, SEARCH_PLUGIN_KEY};
use crate::error::{Error, Result};
use crate::merge::get_yaml_type_name;

/// Which implementation backs a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    /// Written by the user, options kept verbatim.
    Declared,
    /// The host's built-in search.
    Search,
    /// The material theme's search.
    MaterialSearch,
    /// Multi-repository docs aggregation.
    Monorepo,
}

impl PluginKind {
    /// Identifier of the implementation, as shown in resolved output.
    pub fn provider(self) -> &'static str {
        match self {
            PluginKind::Declared => "declared",
            PluginKind::Search => "mkdocs.search",
            PluginKind::MaterialSearch => "material.search",
            PluginKind::Monorepo => "mkdocs-monorepo",
        }
    }

    /// Default options, `None` for kinds that accept anything.
    fn defaults(self) -> Option<Mapping> {
        let pairs: Vec<(&str, Value)> = match self {
            PluginKind::Declared => return None,
            PluginKind::Search => vec![
                ("lang", Value::Null),
                ("separator", Value::from(r"[\s\-]+")),
                ("min_search_length", Value::from(3)),
                ("prebuild_index", Value::Bool(false)),
                ("indexing", Value::from("full")),
            ],
            PluginKind::MaterialSearch => vec![
                ("enabled", Value::Bool(true)),
                ("lang", Value::Null),
                ("separator", Value::from(r"[\s\-]+")),
                ("pipeline", Value::Null),
            ],
            PluginKind::Monorepo => Vec::new(),
        };
        Some(
            pairs
                .into_iter()
                .map(|(key, value)| (Value::from(key), value))
                .collect(),
        )
    }
}

/// Search implementation selected by `use_material_search`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchVariant {
    Builtin,
    Material,
}

impl SearchVariant {
    pub fn from_material_flag(use_material_search: bool) -> Self {
        if use_material_search {
            SearchVariant::Material
        } else {
            SearchVariant::Builtin
        }
    }

    fn kind(self) -> PluginKind {
        match self {
            SearchVariant::Builtin => PluginKind::Search,
            SearchVariant::Material => PluginKind::MaterialSearch,
        }
    }
}

/// One entry of the plugin registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginEntry {
    #[serde(rename = "provider", serialize_with = "serialize_provider")]
    kind: PluginKind,
    config: Mapping,
}

fn serialize_provider<S: serde::Serializer>(
    kind: &PluginKind,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.provider())
}

impl PluginEntry {
    /// A user-declared plugin with its options as written.
    pub fn declared(config: Mapping) -> Self {
        Self {
            kind: PluginKind::Declared,
            config,
        }
    }

    /// Instantiate a built-in plugin with its defaults, not yet configured.
    pub fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            config: kind.defaults().unwrap_or_default(),
        }
    }

    /// The search plugin for the given variant, loaded with no options.
    pub fn search(variant: SearchVariant) -> Result<Self> {
        let mut plugin = Self::new(variant.kind());
        plugin.load_config(&Mapping::new())?;
        Ok(plugin)
    }

    /// The monorepo plugin, loaded with no options.
    pub fn monorepo() -> Result<Self> {
        let mut plugin = Self::new(PluginKind::Monorepo);
        plugin.load_config(&Mapping::new())?;
        Ok(plugin)
    }

    /// Layer `options` over the plugin's current configuration.
    ///
    /// Built-in plugins reject keys they do not know.
    pub fn load_config(&mut self, options: &Mapping) -> Result<()> {
        let known = self.kind.defaults();
        for (key, value) in options {
            if let Some(known) = &known {
                if !known.contains_key(key) {
                    return Err(Error::PluginConfig {
                        plugin: self.kind.provider().to_string(),
                        message: format!("Unrecognised configuration name: {:?}", key),
                    });
                }
            }
            self.config.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    pub fn config(&self) -> &Mapping {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Mapping {
        &mut self.config
    }
}

/// Ordered registry of plugins keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginRegistry {
    entries: Vec<(String, PluginEntry)>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry the host uses when the configuration declares no plugins.
    pub fn host_default() -> Self {
        let mut registry = Self::new();
        registry.insert(SEARCH_PLUGIN_KEY, PluginEntry::declared(Mapping::new()));
        registry
    }

    /// Build a registry from the `plugins` value of a configuration document.
    ///
    /// Accepts a list of names and single-key mappings, or a mapping of
    /// name to options.
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        let mut registry = Self::new();
        match value {
            None => return Ok(Self::host_default()),
            Some(Value::Null) => {}
            Some(Value::Sequence(items)) => {
                for item in items {
                    let (name, options) = named_item("plugins", item)?;
                    registry.insert(name, PluginEntry::declared(options.unwrap_or_default()));
                }
            }
            Some(Value::Mapping(map)) => {
                for (name, options) in map {
                    let name = name_of("plugins", name)?;
                    let options = options_of(&name, options)?;
                    registry.insert(name, PluginEntry::declared(options.unwrap_or_default()));
                }
            }
            Some(other) => {
                return Err(Error::InvalidValue {
                    key: "plugins".to_string(),
                    expected: "Sequence or Mapping",
                    found: get_yaml_type_name(other),
                })
            }
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PluginEntry> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or overwrite. An overwritten entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, entry: PluginEntry) -> Option<PluginEntry> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push((name, entry));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PluginEntry> {
        let idx = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PluginEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PluginRegistry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Options of this plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TechDocsOptions {
    /// Install the material theme's search instead of the built-in one.
    pub use_material_search: bool,
}

impl TechDocsOptions {
    const KNOWN_KEYS: [&'static str; 1] = ["use_material_search"];

    /// Read the options from this plugin's registry entry.
    ///
    /// Unknown keys are warned about and ignored.
    pub fn from_options(options: &Mapping) -> Result<Self> {
        for key in options.keys() {
            if !key.as_str().is_some_and(|k| Self::KNOWN_KEYS.contains(&k)) {
                warn!("{}: ignoring unrecognised option {:?}", PLUGIN_NAME, key);
            }
        }
        serde_yaml::from_value(Value::Mapping(options.clone())).map_err(|err| Error::PluginConfig {
            plugin: PLUGIN_NAME.to_string(),
            message: err.to_string(),
        })
    }
}

/// Split a `name` or `{name: options}` list item.
pub(crate) fn named_item(key: &str, item: &Value) -> Result<(String, Option<Mapping>)> {
    match item {
        Value::String(name) => Ok((name.clone(), None)),
        Value::Mapping(map) => match (map.len(), map.iter().next()) {
            (1, Some((name, options))) => {
                let name = name_of(key, name)?;
                let options = options_of(&name, options)?;
                Ok((name, options))
            }
            (len, _) => Err(Error::ConfigParse {
                message: format!("Entry in '{}' has {} keys, expected exactly one", key, len),
                hint: Some("Write each entry as '- name' or '- name: {options}'".to_string()),
            }),
        },
        other => Err(Error::InvalidValue {
            key: key.to_string(),
            expected: "String or Mapping",
            found: get_yaml_type_name(other),
        }),
    }
}

fn name_of(key: &str, name: &Value) -> Result<String> {
    name.as_str().map(str::to_string).ok_or_else(|| Error::InvalidValue {
        key: key.to_string(),
        expected: "String",
        found: get_yaml_type_name(name),
    })
}

/// Options attached to a named entry; `null` means none. An empty mapping
/// is kept as written.
pub(crate) fn options_of(name: &str, options: &Value) -> Result<Option<Mapping>> {
    match options {
        Value::Null => Ok(None),
        Value::Mapping(map) => Ok(Some(map.clone())),
        other => Err(Error::InvalidValue {
            key: name.to_string(),
            expected: "Mapping",
            found: get_yaml_type_name(other),
        }),
    }
}
