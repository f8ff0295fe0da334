//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::MINIMAL);
//!     fixture.command().arg("augment").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common build configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Smallest valid configuration.
    pub const MINIMAL: &str = "site_name: Test Docs\n";

    /// A typical TechDocs project.
    pub const TECHDOCS: &str = r#"
site_name: Test Docs
site_description: Documentation for tests
plugins:
  - techdocs-core
"#;

    /// Asks for the material search plugin.
    pub const MATERIAL_SEARCH: &str = r#"
site_name: Test Docs
plugins:
  - techdocs-core:
      use_material_search: true
"#;

    /// Customised foreign theme and user extension options.
    pub const CUSTOMISED: &str = r##"
site_name: Test Docs
theme:
  name: readthedocs
  features: [toc.integrate]
  palette:
    primary: indigo
plugins:
  - search
  - techdocs-core
markdown_extensions:
  - footnotes
  - toc:
      permalink: "#"
      toc_depth: 3
  - pymdownx.snippets:
      restrict_base_path: false
  - markdown.extensions.tables:
      use_align_attribute: true
"##;

    /// Not YAML at all.
    pub const INVALID_YAML: &str = "site_name: [unclosed";

    /// Valid YAML without the required site name.
    pub const MISSING_SITE_NAME: &str = "theme: material\n";
}

/// A temporary directory with an optional `mkdocs.yml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `mkdocs.yml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("mkdocs.yml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("mkdocs.yml")
    }

    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A command for the binary, running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("techdocs-core");
        cmd.current_dir(self.path()).env_remove("TECHDOCS_CONFIG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
