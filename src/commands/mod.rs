//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `techdocs-core` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `techdocs_core` library.

pub mod augment;
pub mod completions;
pub mod metadata;
