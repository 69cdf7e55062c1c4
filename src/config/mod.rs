//! Configuration layer for pagewatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - The JSON settings file ([`SettingsFile`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Settings template generation ([`write_template`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority
//! (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **Settings file** - `--config <path>`, or the default location
//!    (`<config dir>/pagewatch/config.json`) when it exists
//! 3. **Built-in defaults** - only the polling interval has one
//!
//! The URL is always required. The Telegram token and chat id are required
//! unless `--dry-run` is set, in which case detected changes are logged
//! instead of sent.
//!
//! The settings file is a flat JSON object with fields `url`, `interval`,
//! `token`, `chat_id`, and `message_template`; `pagewatch init` writes a
//! template and `--save` persists the effective settings back.

mod cli;
pub mod defaults;
mod error;
mod file;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod file_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use file::{SettingsFile, write_template};
pub use validated::{TelegramTarget, ValidatedConfig};
