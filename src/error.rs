//! # Error Handling
//!
//! This module defines the centralized error type for `techdocs-core`. It uses
//! the `thiserror` library to describe every way an augmentation run can fail,
//! with enough context to tell the user which key or plugin is at fault.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering configuration parsing, wrong-shaped
//!   values, plugin option problems, and the wrapped I/O and serialization
//!   errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every error is fatal to the current build. Nothing is retried.

use thiserror::Error;

/// Main error type for techdocs-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The build configuration document could not be understood.
    ///
    /// Includes an optional hint describing how to fix the document.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A configuration key held a value of the wrong shape.
    #[error("Invalid value for '{key}': expected {expected}, found {found}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A plugin was given options it cannot accept.
    #[error("Plugin configuration error: {plugin} - {message}")]
    PluginConfig { plugin: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            message: "Missing site_name".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("Missing site_name"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "Theme mapping has no name".to_string(),
            hint: Some("Add 'name: material' to the theme block".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Theme mapping has no name"));
        assert!(display.contains("hint:"));
        assert!(display.contains("name: material"));
    }

    #[test]
    fn test_error_display_invalid_value() {
        let error = Error::InvalidValue {
            key: "markdown_extensions".to_string(),
            expected: "Sequence",
            found: "Number",
        };
        let display = format!("{}", error);
        assert!(display.contains("'markdown_extensions'"));
        assert!(display.contains("expected Sequence"));
        assert!(display.contains("found Number"));
    }

    #[test]
    fn test_error_display_plugin_config() {
        let error = Error::PluginConfig {
            plugin: "techdocs-core".to_string(),
            message: "use_material_search must be a boolean".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Plugin configuration error"));
        assert!(display.contains("techdocs-core"));
        assert!(display.contains("must be a boolean"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(format!("{}", error).contains("JSON serialization error"));
    }
}
