//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagewatch: web page change monitor
///
/// Polls a single web page on an interval, detects content changes by
/// hashing the response body, and notifies a Telegram chat.
#[derive(Debug, Parser)]
#[command(name = "pagewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Web page URL to watch
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Polling interval in seconds
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Telegram bot token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Telegram chat id to notify
    #[arg(long = "chat-id", global = true)]
    pub chat_id: Option<String>,

    /// Handlebars template for the notification message
    /// (variables: {{url}}, {{time}})
    #[arg(long = "message-template", global = true)]
    pub message_template: Option<String>,

    /// Path to the settings file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Persist the effective settings back to the settings file
    #[arg(long)]
    pub save: bool,

    /// Log detected changes without sending Telegram messages
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for pagewatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a settings file template
    Init {
        /// Output path for the settings file
        #[arg(long, short, default_value = "pagewatch.json")]
        output: PathBuf,
    },

    /// Send a one-shot test message to the configured chat
    Test,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
