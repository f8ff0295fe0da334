//! # Terminal Output
//!
//! Decides whether CLI status lines are decorated with emoji or written as
//! plain-text markers. `--color` forces the choice; in `auto` mode the
//! environment decides:
//! - `NO_COLOR` (any value, even empty) or `CLICOLOR=0` turns decoration off
//! - `CLICOLOR_FORCE=1` turns it on even when stdout is not a terminal
//! - `TERM=dumb` turns it off
//! - otherwise the terminal's own capabilities are used

use clap::ValueEnum;
use std::env;

/// Value of the `--color` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

/// How status lines are written
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    decorate: bool,
}

impl OutputConfig {
    pub fn new(choice: ColorChoice) -> Self {
        let decorate = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => terminal_supports_color(),
        };
        Self { decorate }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { decorate: false }
    }

    /// Marker in front of a status line reporting success.
    pub fn success_marker(&self) -> &'static str {
        if self.decorate {
            "✅"
        } else {
            "[OK]"
        }
    }
}

fn terminal_supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() || env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| !v.is_empty() && v != "0") {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}
