//! Leaf-override merging of option mappings
//!
//! Core option values have to take precedence over whatever the user wrote,
//! without throwing away the user's unrelated keys. This module provides that
//! merge as a pure function and as an in-place variant.
//!
//! ## Rules
//!
//! For every key in the core mapping:
//! - if the core value is a mapping and the user mapping holds a mapping at
//!   the same key, merge recursively,
//! - otherwise the core value replaces the user value at that key.
//!
//! Core wins at every leaf, unconditionally.
//!
//! ## Example
//!
//! ```
//! use serde_yaml::{Mapping, Value};
//! use techdocs_core::merge::merge_leaf_override;
//!
//! let core: Mapping = serde_yaml::from_str("restrict_base_path: true").unwrap();
//! let user: Mapping =
//!     serde_yaml::from_str("restrict_base_path: false\nbase_path: docs").unwrap();
//!
//! let merged = merge_leaf_override(&core, &user);
//! assert_eq!(merged.get("restrict_base_path"), Some(&Value::Bool(true)));
//! assert_eq!(merged.get("base_path"), Some(&Value::from("docs")));
//! ```

use log::warn;
use serde_yaml::{Mapping, Value as YamlValue};

use crate::config::MdxConfigs;

/// Merge `core` over `user` and return the result, leaving both inputs intact.
pub fn merge_leaf_override(core: &Mapping, user: &Mapping) -> Mapping {
    let mut merged = user.clone();
    merge_core_configs(core, &mut merged, "");
    merged
}

/// Merge `core` into `user` in place.
///
/// `path` is the dotted location of `user` and is only used for logging.
pub fn merge_core_configs(core: &Mapping, user: &mut Mapping, path: &str) {
    for (key, value) in core {
        let key_path = join_path(path, key);
        match (value, user.get_mut(key)) {
            (YamlValue::Mapping(core_map), Some(YamlValue::Mapping(user_map))) => {
                merge_core_configs(core_map, user_map, &key_path);
            }
            (YamlValue::Mapping(_), Some(existing)) => {
                warn!(
                    "Type mismatch at '{}': replacing {} with Mapping",
                    key_path,
                    get_yaml_type_name(existing)
                );
                *existing = value.clone();
            }
            (_, Some(existing)) => {
                *existing = value.clone();
            }
            (_, None) => {
                user.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Apply per-extension core options to the extension option table.
///
/// An extension that has no entry yet receives the core options verbatim.
pub fn merge_core_into_mdx(core: &MdxConfigs, mdx_configs: &mut MdxConfigs) {
    for (extension, options) in core {
        let entry = mdx_configs.entry(extension.clone()).or_default();
        merge_core_configs(options, entry, extension);
    }
}

fn join_path(path: &str, key: &YamlValue) -> String {
    let key_str = match key {
        YamlValue::String(s) => s.clone(),
        _ => format!("{:?}", key),
    };
    if path.is_empty() {
        key_str
    } else {
        format!("{}.{}", path, key_str)
    }
}

/// Get a human-readable type name for a YAML value
///
/// Used for logging and error messages to describe the type of a value.
pub fn get_yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "Null",
        YamlValue::Bool(_) => "Bool",
        YamlValue::Number(_) => "Number",
        YamlValue::String(_) => "String",
        YamlValue::Sequence(_) => "Sequence",
        YamlValue::Mapping(_) => "Mapping",
        YamlValue::Tagged(_) => "Tagged",
    }
}
