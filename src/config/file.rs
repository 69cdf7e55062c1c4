//! The JSON settings file.
//!
//! Settings persist as a flat JSON object with optional fields; absent
//! fields fall back to CLI values or defaults during validation. Writes
//! are atomic (temp file + rename) so an interrupted save never leaves
//! a half-written file behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// On-disk settings: a flat JSON object.
///
/// Every field is optional here; requiredness is enforced by
/// [`super::ValidatedConfig`] after merging with CLI arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Web page URL to watch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Polling interval in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// Telegram bot token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Telegram chat id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,

    /// Notification message template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
}

impl SettingsFile {
    /// Loads settings from a path that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be read and
    /// [`ConfigError::FileParse`] if it is not a valid JSON object.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::FileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from a path that may not exist.
    ///
    /// A missing file yields `Ok(None)`; any other failure is an error.
    ///
    /// # Errors
    ///
    /// Same as [`SettingsFile::load`], except `NotFound`.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|source| ConfigError::FileParse {
                    path: path.to_path_buf(),
                    source,
                }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Saves settings as pretty-printed JSON, atomically.
    ///
    /// Writes to `{path}.tmp` first, then renames over the target, so the
    /// file is either fully written or untouched. Parent directories are
    /// created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileWrite`] on any I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::FileWrite {
            path: path.to_path_buf(),
            source,
        };

        // Serializing a struct of scalars cannot fail; surface it as an
        // I/O error rather than panic if serde ever disagrees.
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        // Append .tmp instead of replacing the extension so
        // config.json -> config.json.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&temp_path, content).map_err(write_err)?;
        std::fs::rename(&temp_path, path).map_err(write_err)
    }
}

/// Writes a settings template with placeholder values.
///
/// # Errors
///
/// Returns [`ConfigError::FileWrite`] if the file cannot be written.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    let template = SettingsFile {
        url: Some("https://example.com/page-to-watch".to_string()),
        interval: Some(super::defaults::INTERVAL_SECS),
        token: Some("123456:replace-with-bot-token".to_string()),
        chat_id: Some("123456789".to_string()),
        message_template: None,
    };
    template.save(path)
}
