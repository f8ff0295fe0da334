//! Metadata command implementation
//!
//! Prints `techdocs_metadata.json` as the host would render it for the given
//! build configuration.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use techdocs_core::config::BuildConfig;
use techdocs_core::defaults::default_config_path;
use techdocs_core::metadata::render_metadata;

/// Arguments for the metadata command
#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Path to the build configuration (defaults to mkdocs.yml)
    #[arg(short, long, value_name = "PATH", env = "TECHDOCS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the metadata command
pub fn execute(args: MetadataArgs) -> Result<()> {
    let config_path = args.config.unwrap_or_else(default_config_path);
    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let config = BuildConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    println!("{}", render_metadata(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_missing_config() {
        let result = execute(MetadataArgs {
            config: Some(PathBuf::from("/nonexistent/mkdocs.yml")),
        });
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Configuration file not found"));
    }

    #[test]
    fn test_execute_invalid_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mkdocs.yml");
        std::fs::write(&config_path, "theme: material\n").unwrap();

        let result = execute(MetadataArgs {
            config: Some(config_path),
        });
        assert!(result.is_err());
    }
}
