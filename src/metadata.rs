//! # Site Metadata File
//!
//! Every build ships a `techdocs_metadata.json` describing the site. The
//! augmenter does not write the JSON itself: it writes a template expression
//! into a theme directory and registers it as a static template, and the
//! host's template engine evaluates it while building.
//!
//! [`ThemeWorkspace`] owns that directory. By default it is a temporary
//! directory removed when the workspace is dropped; [`ThemeWorkspace::keep`]
//! persists it for a host running in another process, and
//! [`ThemeWorkspace::at`] uses a caller-chosen directory instead.
//!
//! [`render_metadata`] evaluates the template the way the host engine does,
//! which is what the `metadata` command prints.

use log::debug;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::BuildConfig;
use crate::error::Result;

/// Name of the generated file, relative to the theme directory.
pub const METADATA_FILE_NAME: &str = "techdocs_metadata.json";

/// Template expression the host evaluates into the metadata JSON.
pub const METADATA_TEMPLATE: &str = concat!(
    r#"{{ {"site_name": (config.site_name | string), "#,
    r#""site_description": (config.site_description | string)} | tojson }}"#
);

/// Directory holding the generated theme files
#[derive(Debug)]
pub enum ThemeWorkspace {
    /// Removed when dropped.
    Temporary(TempDir),
    /// Left in place.
    Fixed(PathBuf),
}

impl ThemeWorkspace {
    /// Create a fresh temporary workspace.
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("techdocs-theme-").tempdir()?;
        debug!("Created theme workspace {}", dir.path().display());
        Ok(ThemeWorkspace::Temporary(dir))
    }

    /// Use `dir` as the workspace, creating it if needed.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(ThemeWorkspace::Fixed(dir))
    }

    pub fn path(&self) -> &Path {
        match self {
            ThemeWorkspace::Temporary(dir) => dir.path(),
            ThemeWorkspace::Fixed(dir) => dir,
        }
    }

    /// Path of the metadata file inside the workspace.
    pub fn metadata_path(&self) -> PathBuf {
        self.path().join(METADATA_FILE_NAME)
    }

    /// Write the metadata template, replacing any previous file.
    pub fn write_metadata(&self) -> Result<PathBuf> {
        let path = self.metadata_path();
        std::fs::write(&path, METADATA_TEMPLATE)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Stop managing the directory and return its path.
    pub fn keep(self) -> PathBuf {
        match self {
            ThemeWorkspace::Temporary(dir) => dir.keep(),
            ThemeWorkspace::Fixed(dir) => dir,
        }
    }
}

/// Evaluate [`METADATA_TEMPLATE`] against `config`.
///
/// Matches the host engine: a missing description renders through `string`
/// as `None`, keys are sorted, separators are `", "` and `": "`, non-ASCII is
/// written as `\uXXXX`, and `<`, `>`, `&`, `'` are escaped for HTML safety.
pub fn render_metadata(config: &BuildConfig) -> Result<String> {
    let mut fields = BTreeMap::new();
    fields.insert("site_name", config.site_name.as_str());
    fields.insert(
        "site_description",
        config.site_description.as_deref().unwrap_or("None"),
    );

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, HtmlSafeFormatter);
    fields.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}

/// `tojson` output style: spaced separators, ASCII-only, HTML-safe strings.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() && !matches!(ch, '<' | '>' | '&' | '\'') {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_text() {
        insta::assert_snapshot!(
            METADATA_TEMPLATE,
            @r#"{{ {"site_name": (config.site_name | string), "site_description": (config.site_description | string)} | tojson }}"#
        );
    }

    #[test]
    fn test_temporary_workspace_writes_and_cleans_up() {
        let workspace = ThemeWorkspace::temporary().unwrap();
        let dir = workspace.path().to_path_buf();
        let file = workspace.write_metadata().unwrap();
        assert_eq!(file, dir.join(METADATA_FILE_NAME));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), METADATA_TEMPLATE);

        drop(workspace);
        assert!(!dir.exists());
    }

    #[test]
    fn test_kept_workspace_survives() {
        let workspace = ThemeWorkspace::temporary().unwrap();
        workspace.write_metadata().unwrap();
        let dir = workspace.keep();
        assert!(dir.join(METADATA_FILE_NAME).exists());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_fixed_workspace_is_created() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("nested").join("theme");
        let workspace = ThemeWorkspace::at(&dir).unwrap();
        workspace.write_metadata().unwrap();
        assert!(dir.join(METADATA_FILE_NAME).is_file());
    }

    #[test]
    fn test_render_metadata() {
        let mut config = BuildConfig::new("My Docs");
        config.site_description = Some("All about it".to_string());
        insta::assert_snapshot!(
            render_metadata(&config).unwrap(),
            @r#"{"site_description": "All about it", "site_name": "My Docs"}"#
        );
    }

    #[test]
    fn test_render_metadata_missing_description() {
        let config = BuildConfig::new("Docs");
        assert_eq!(
            render_metadata(&config).unwrap(),
            r#"{"site_description": "None", "site_name": "Docs"}"#
        );
    }

    #[test]
    fn test_render_metadata_escapes() {
        let config = BuildConfig::new("Tom & Jerry's <docs> \"q\" caf\u{e9} \u{1F600}");
        assert_eq!(
            render_metadata(&config).unwrap(),
            r#"{"site_description": "None", "site_name": "Tom \u0026 Jerry\u0027s \u003cdocs\u003e \"q\" caf\u00e9 \ud83d\ude00"}"#
        );
    }

    #[test]
    fn test_rendered_metadata_is_valid_json() {
        let mut config = BuildConfig::new("Docs\nwith newline");
        config.site_description = Some("tab\there".to_string());
        let value: serde_json::Value = serde_json::from_str(&render_metadata(&config).unwrap()).unwrap();
        assert_eq!(value["site_name"], "Docs\nwith newline");
        assert_eq!(value["site_description"], "tab\there");
    }
}
