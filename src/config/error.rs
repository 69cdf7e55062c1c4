//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and settings-file I/O.
/// All of these are rejected before the monitor starts, never during
/// the loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    FileRead {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not a valid flat JSON object.
    #[error("Failed to parse settings file '{}': {source}", path.display())]
    FileParse {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the settings file (init or `--save`).
    #[error("Failed to write settings file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required value that must come from CLI or settings file.
    #[error("Missing required setting: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// The watched URL is not an absolute http(s) URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The polling interval is unusable.
    #[error("Invalid interval: {reason}")]
    InvalidInterval {
        /// Reason for invalidity
        reason: String,
    },

    /// The notification message template does not compile.
    #[error("Invalid message template: {reason}")]
    InvalidTemplate {
        /// Reason for invalidity
        reason: String,
    },

    /// No settings file path is available (no `--config` and the
    /// platform has no config directory).
    #[error("No settings file location available; pass --config <path>")]
    NoSettingsPath,
}

/// Well-known field names for `MissingRequired` errors.
pub mod field {
    /// The watched page URL.
    pub const URL: &str = "url";
    /// The Telegram bot token.
    pub const TOKEN: &str = "token";
    /// The Telegram chat id.
    pub const CHAT_ID: &str = "chat_id";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
