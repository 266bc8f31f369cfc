//! # Error Handling
//!
//! This module defines the centralized error type for `cdn-externals`. It uses
//! the `thiserror` library to build a single `Error` enum covering every
//! failure the library can report.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes. The only domain error is
//!   `Error::Configuration`, raised when a module or page entry is malformed.
//!   It always carries the location of the offending entry (for example
//!   `externals.pages.page1[0]`) so the build can fail fast with a message
//!   that points at the right line of the configuration.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The remaining variants wrap errors from the loaders and renderers:
//!
//! - I/O errors while reading a configuration file.
//! - YAML and JSON errors, from both parsing and rendering.
//! - TOML parsing errors.
//!
//! Absent or empty configuration is never an error; it is the valid
//! "no external modules" case.

use thiserror::Error;

/// Main error type for cdn-externals operations
#[derive(Error, Debug)]
pub enum Error {
    /// A module or page entry in the configuration is malformed.
    ///
    /// `location` names the offending entry using a dotted path with list
    /// indices (`externals.common[2]`, `pages.home`). An optional hint
    /// explains how to fix it.
    #[error("Configuration error at {location}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        location: String,
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing or rendering error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Build a `Configuration` error without a hint.
    pub fn config(location: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Configuration {
            location: location.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Build a `Configuration` error with a hint.
    pub fn config_with_hint(
        location: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Error::Configuration {
            location: location.into(),
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
