//! # TechDocs Core CLI
//!
//! This is the binary entry point for the `techdocs-core` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initialising logging.
//! - Executing the appropriate command and reporting top-level errors.
//!
//! The augmentation logic lives in the `lib.rs` library crate, so the binary
//! stays a thin wrapper around it.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
