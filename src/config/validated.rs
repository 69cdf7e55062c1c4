//! Validated configuration after merging CLI and settings-file sources.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::notify::MessageTemplate;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::file::SettingsFile;

/// Telegram delivery target: bot token plus recipient chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramTarget {
    /// Bot API token.
    pub token: String,
    /// Chat id the bot sends to.
    pub chat_id: String,
}

/// Fully validated configuration ready for use by the application.
///
/// All required values are present and checked: the URL is an absolute
/// http(s) URL, the interval is at least one second, and Telegram
/// credentials are complete unless dry-run mode is active.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Watched page URL.
    pub url: Url,

    /// Polling interval.
    pub interval: Duration,

    /// Telegram target; `None` only in dry-run mode.
    pub telegram: Option<TelegramTarget>,

    /// Compiled notification message template.
    pub message_template: MessageTemplate,

    /// Raw template string as provided, kept for `--save`.
    pub message_template_raw: Option<String>,

    /// Resolved settings file path (explicit `--config` or the default
    /// location), used by `--save`.
    pub settings_path: Option<PathBuf>,

    /// Persist effective settings after validation.
    pub save: bool,

    /// Log detected changes without sending messages.
    pub dry_run: bool,

    /// Verbose logging enabled.
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token stays out of logs.
        let target = self
            .telegram
            .as_ref()
            .map_or_else(|| "none".to_string(), |t| format!("chat {}", t.chat_id));

        write!(
            f,
            "Config {{ url: {}, interval: {}s, telegram: {}, dry_run: {} }}",
            self.url,
            self.interval.as_secs(),
            target,
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Loads and merges configuration from CLI and the settings file.
    ///
    /// An explicit `--config` path must exist; the default location is
    /// used only when the file is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed,
    /// or if the merged configuration is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let (settings, path) = if let Some(path) = cli.config.clone() {
            (Some(SettingsFile::load(&path)?), Some(path))
        } else if let Some(path) = defaults::settings_path() {
            (SettingsFile::load_optional(&path)?, Some(path))
        } else {
            (None, None)
        };

        Self::from_raw(cli, settings.as_ref(), path)
    }

    /// Creates a validated configuration from CLI arguments and optional
    /// settings. CLI arguments take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing or not absolute http(s),
    /// the interval is zero, Telegram credentials are incomplete outside
    /// dry-run mode, or the message template does not compile.
    pub fn from_raw(
        cli: &Cli,
        settings: Option<&SettingsFile>,
        settings_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, settings)?;
        let interval = Self::resolve_interval(cli, settings)?;
        let telegram = Self::resolve_telegram(cli, settings)?;
        let (message_template, message_template_raw) = Self::resolve_template(cli, settings)?;

        Ok(Self {
            url,
            interval,
            telegram,
            message_template,
            message_template_raw,
            settings_path,
            save: cli.save,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Converts the effective configuration back into a settings file
    /// record for `--save`.
    #[must_use]
    pub fn to_settings(&self) -> SettingsFile {
        SettingsFile {
            url: Some(self.url.to_string()),
            interval: Some(self.interval.as_secs()),
            token: self.telegram.as_ref().map(|t| t.token.clone()),
            chat_id: self.telegram.as_ref().map(|t| t.chat_id.clone()),
            message_template: self.message_template_raw.clone(),
        }
    }

    fn resolve_url(cli: &Cli, settings: Option<&SettingsFile>) -> Result<Url, ConfigError> {
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| settings.and_then(|s| s.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set url in the settings file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            }),
        }
    }

    fn resolve_interval(
        cli: &Cli,
        settings: Option<&SettingsFile>,
    ) -> Result<Duration, ConfigError> {
        let seconds = cli
            .interval
            .or_else(|| settings.and_then(|s| s.interval))
            .unwrap_or(defaults::INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidInterval {
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_telegram(
        cli: &Cli,
        settings: Option<&SettingsFile>,
    ) -> Result<Option<TelegramTarget>, ConfigError> {
        let token = cli
            .token
            .clone()
            .or_else(|| settings.and_then(|s| s.token.clone()));
        let chat_id = cli
            .chat_id
            .clone()
            .or_else(|| settings.and_then(|s| s.chat_id.clone()));

        match (token, chat_id) {
            (Some(token), Some(chat_id)) => Ok(Some(TelegramTarget { token, chat_id })),
            // Dry-run can proceed without credentials, even partial ones.
            _ if cli.dry_run => Ok(None),
            (None, _) => Err(ConfigError::missing(
                field::TOKEN,
                "Use --token or set token in the settings file",
            )),
            (_, None) => Err(ConfigError::missing(
                field::CHAT_ID,
                "Use --chat-id or set chat_id in the settings file",
            )),
        }
    }

    fn resolve_template(
        cli: &Cli,
        settings: Option<&SettingsFile>,
    ) -> Result<(MessageTemplate, Option<String>), ConfigError> {
        let raw = cli
            .message_template
            .clone()
            .or_else(|| settings.and_then(|s| s.message_template.clone()));

        match raw {
            Some(raw) => {
                let template = MessageTemplate::new(&raw).map_err(|e| {
                    ConfigError::InvalidTemplate {
                        reason: e.reason,
                    }
                })?;
                Ok((template, Some(raw)))
            }
            None => Ok((MessageTemplate::default(), None)),
        }
    }
}
