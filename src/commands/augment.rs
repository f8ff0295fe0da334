//! Augment command implementation
//!
//! Loads a build configuration, runs the augmenter over it once and writes
//! the resolved configuration to a file or stdout. The theme workspace
//! holding `techdocs_metadata.json` is left on disk so the host can build
//! against it afterwards.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

use techdocs_core::augment::Augmenter;
use techdocs_core::config::BuildConfig;
use techdocs_core::defaults::{default_config_path, PLUGIN_NAME};
use techdocs_core::metadata::ThemeWorkspace;
use techdocs_core::plugins::PluginEntry;

use crate::output::OutputConfig;

/// Serialization of the resolved configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the augment command
#[derive(Args, Debug)]
pub struct AugmentArgs {
    /// Path to the build configuration (defaults to mkdocs.yml)
    #[arg(short, long, value_name = "PATH", env = "TECHDOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the resolved configuration here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Install the material theme's search plugin
    #[arg(long)]
    pub use_material_search: bool,

    /// Directory for generated theme files (defaults to a new temporary directory)
    #[arg(long, value_name = "DIR")]
    pub theme_dir: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the augment command
pub fn execute(args: AugmentArgs, output: &OutputConfig) -> Result<()> {
    let config_path = args.config.unwrap_or_else(default_config_path);
    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let mut config = BuildConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if args.use_material_search {
        force_material_search(&mut config);
    }

    let workspace = match &args.theme_dir {
        Some(dir) => ThemeWorkspace::at(dir)?,
        None => ThemeWorkspace::temporary()?,
    };
    let augmenter = Augmenter::with_workspace(workspace);
    let config = augmenter.on_config(config)?;

    let rendered = match args.format {
        OutputFormat::Yaml => config.to_yaml_string()?,
        OutputFormat::Json => config.to_json_string()? + "\n",
    };

    let theme_dir = augmenter.into_workspace().keep();
    info!("Theme files written to {}", theme_dir.display());

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !args.quiet {
                println!(
                    "{} Augmented configuration written to {}",
                    output.success_marker(),
                    path.display()
                );
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Set `use_material_search: true` on this plugin's entry, registering it if
/// the configuration does not list it.
fn force_material_search(config: &mut BuildConfig) {
    let key = Value::from("use_material_search");
    match config.plugins.get_mut(PLUGIN_NAME) {
        Some(entry) => {
            entry.config_mut().insert(key, Value::Bool(true));
        }
        None => {
            let mut options = Mapping::new();
            options.insert(key, Value::Bool(true));
            config.plugins.insert(PLUGIN_NAME, PluginEntry::declared(options));
        }
    }
}
