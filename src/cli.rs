//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::output::{ColorChoice, OutputConfig};

/// TechDocs Core - Augment documentation build configurations
#[derive(Parser, Debug)]
#[command(name = "techdocs-core")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Decorate status output with emoji
    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "WHEN",
        default_value_t = ColorChoice::Auto
    )]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Augment a build configuration and print the resolved result
    Augment(commands::augment::AugmentArgs),

    /// Print the evaluated techdocs_metadata.json for a build configuration
    Metadata(commands::metadata::MetadataArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::new(self.color);

        match self.command {
            Commands::Augment(args) => commands::augment::execute(args, &output),
            Commands::Metadata(args) => commands::metadata::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr. `RUST_LOG` takes precedence over the flag.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
