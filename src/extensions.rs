//! Markdown extension registry
//!
//! Extensions are enabled by identifier, in order, and configured through a
//! separate table of option mappings. This module holds the fixed set of
//! extensions every build gets and the two operations that apply them:
//!
//! - [`merge_extension`]: enable an extension once and lay its default
//!   options over the user's,
//! - [`redistribute_extra_configs`]: move options of `pymdownx.extra`
//!   sub-extensions under the `pymdownx.extra` namespace.

use log::debug;
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

use crate::config::MdxConfigs;

/// Extension that bundles the [`EXTRA_EXTENSIONS`].
pub const EXTRA_NAMESPACE: &str = "pymdownx.extra";

/// Sub-extensions loaded by `pymdownx.extra`, configured through its options.
pub const EXTRA_EXTENSIONS: [&str; 8] = [
    "markdown.extensions.footnotes",
    "markdown.extensions.attr_list",
    "markdown.extensions.def_list",
    "markdown.extensions.tables",
    "markdown.extensions.abbr",
    "pymdownx.betterem",
    "pymdownx.superfences",
    "markdown.extensions.md_in_html",
];

/// Host callable used to render emoji as inline SVG.
pub const EMOJI_GENERATOR: &str = "python/name:pymdownx.emoji.to_svg";

/// A reference to a host-side function, carried as a tagged YAML value.
///
/// The tag is serialized as a local tag (`!python/name:...`). The host's
/// loader only resolves the `!!python/name:` form, so a resolved
/// configuration written out as YAML is not a valid input for the emoji
/// generator until the tag is rewritten.
pub fn host_callable(path: &str) -> Value {
    Value::Tagged(Box::new(TaggedValue {
        tag: Tag::new(path),
        value: Value::String(String::new()),
    }))
}

/// The extensions every build is given, in load order, with their defaults.
pub fn default_extensions() -> Vec<(&'static str, Mapping)> {
    fn options(pairs: Vec<(&str, Value)>) -> Mapping {
        pairs
            .into_iter()
            .map(|(key, value)| (Value::from(key), value))
            .collect()
    }

    vec![
        ("admonition", Mapping::new()),
        ("toc", options(vec![("permalink", Value::Bool(true))])),
        ("pymdownx.caret", Mapping::new()),
        ("pymdownx.critic", Mapping::new()),
        ("pymdownx.details", Mapping::new()),
        (
            "pymdownx.emoji",
            options(vec![("emoji_generator", host_callable(EMOJI_GENERATOR))]),
        ),
        ("pymdownx.inlinehilite", Mapping::new()),
        ("pymdownx.magiclink", Mapping::new()),
        ("pymdownx.mark", Mapping::new()),
        ("pymdownx.smartsymbols", Mapping::new()),
        ("pymdownx.snippets", Mapping::new()),
        (
            "pymdownx.highlight",
            options(vec![
                ("linenums", Value::Bool(true)),
                ("pygments_lang_class", Value::Bool(true)),
            ]),
        ),
        (
            EXTRA_NAMESPACE,
            options(vec![("smart_enable", Value::from("all"))]),
        ),
        (
            "pymdownx.tabbed",
            options(vec![("alternate_style", Value::Bool(true))]),
        ),
        (
            "pymdownx.tasklist",
            options(vec![("custom_checkbox", Value::Bool(true))]),
        ),
        ("pymdownx.tilde", Mapping::new()),
        ("markdown_inline_graphviz", Mapping::new()),
        ("plantuml_markdown", Mapping::new()),
        ("mdx_truly_sane_lists", Mapping::new()),
    ]
}

/// Enable `extension` and merge `defaults` into its options.
///
/// The identifier is appended only when missing, so user ordering is kept.
/// Defaults replace user values on key collisions; other user keys stay.
pub fn merge_extension(
    extensions: &mut Vec<String>,
    mdx_configs: &mut MdxConfigs,
    extension: &str,
    defaults: Mapping,
) {
    if !extensions.iter().any(|name| name == extension) {
        extensions.push(extension.to_string());
    }
    match mdx_configs.get_mut(extension) {
        Some(options) => {
            for (key, value) in defaults {
                options.insert(key, value);
            }
        }
        None => {
            mdx_configs.insert(extension.to_string(), defaults);
        }
    }
}

/// Apply [`default_extensions`] in order.
pub fn merge_default_extensions(extensions: &mut Vec<String>, mdx_configs: &mut MdxConfigs) {
    for (extension, defaults) in default_extensions() {
        merge_extension(extensions, mdx_configs, extension, defaults);
    }
}

/// Move top-level options of `pymdownx.extra` sub-extensions under the
/// `pymdownx.extra` entry, which is created if missing.
///
/// A nested block already present under the same key is replaced.
pub fn redistribute_extra_configs(mdx_configs: &mut MdxConfigs) {
    let mut moved = Vec::new();
    for extension in EXTRA_EXTENSIONS {
        if let Some(options) = mdx_configs.remove(extension) {
            moved.push((extension, options));
        }
    }

    let extra = mdx_configs.entry(EXTRA_NAMESPACE.to_string()).or_default();
    for (extension, options) in moved {
        debug!("Moving '{}' options under '{}'", extension, EXTRA_NAMESPACE);
        extra.insert(Value::from(extension), Value::Mapping(options));
    }
}
