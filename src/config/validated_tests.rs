use std::time::Duration;

use super::cli::Cli;
use super::error::{ConfigError, field};
use super::file::SettingsFile;
use super::validated::ValidatedConfig;

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["pagewatch"];
    full.extend_from_slice(args);
    Cli::parse_from_iter(full)
}

fn full_settings() -> SettingsFile {
    SettingsFile {
        url: Some("https://file.example.com/".to_string()),
        interval: Some(120),
        token: Some("file-token".to_string()),
        chat_id: Some("file-chat".to_string()),
        message_template: None,
    }
}

#[test]
fn cli_values_override_file_values() {
    let cli = cli(&[
        "--url",
        "https://cli.example.com/",
        "--interval",
        "30",
        "--token",
        "cli-token",
        "--chat-id",
        "cli-chat",
    ]);

    let config = ValidatedConfig::from_raw(&cli, Some(&full_settings()), None).unwrap();

    assert_eq!(config.url.as_str(), "https://cli.example.com/");
    assert_eq!(config.interval, Duration::from_secs(30));
    let telegram = config.telegram.unwrap();
    assert_eq!(telegram.token, "cli-token");
    assert_eq!(telegram.chat_id, "cli-chat");
}

#[test]
fn file_fills_values_the_cli_omits() {
    let cli = cli(&["--url", "https://cli.example.com/"]);
    let config = ValidatedConfig::from_raw(&cli, Some(&full_settings()), None).unwrap();

    assert_eq!(config.url.as_str(), "https://cli.example.com/");
    assert_eq!(config.interval, Duration::from_secs(120));
    assert_eq!(config.telegram.unwrap().token, "file-token");
}

#[test]
fn interval_defaults_when_nobody_sets_it() {
    let cli = cli(&["--url", "https://example.com/", "--dry-run"]);
    let config = ValidatedConfig::from_raw(&cli, None, None).unwrap();

    assert_eq!(
        config.interval,
        Duration::from_secs(super::defaults::INTERVAL_SECS)
    );
}

#[test]
fn missing_url_is_rejected() {
    let cli = cli(&["--token", "t", "--chat-id", "c"]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingRequired {
            field: field::URL,
            ..
        }
    ));
}

#[test]
fn unparseable_url_is_rejected() {
    let cli = cli(&["--url", "notaurl", "--dry-run"]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

#[test]
fn non_http_scheme_is_rejected() {
    let cli = cli(&["--url", "ftp://example.com/file", "--dry-run"]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    match err {
        ConfigError::InvalidUrl { reason, .. } => assert!(reason.contains("ftp")),
        other => panic!("expected InvalidUrl, got {other}"),
    }
}

#[test]
fn zero_interval_is_rejected() {
    let cli = cli(&["--url", "https://example.com/", "--interval", "0", "--dry-run"]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidInterval { .. }));
}

#[test]
fn missing_token_is_rejected_without_dry_run() {
    let cli = cli(&["--url", "https://example.com/", "--chat-id", "42"]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingRequired {
            field: field::TOKEN,
            ..
        }
    ));
}

#[test]
fn missing_chat_id_is_rejected_without_dry_run() {
    let cli = cli(&["--url", "https://example.com/", "--token", "123:abc"]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingRequired {
            field: field::CHAT_ID,
            ..
        }
    ));
}

#[test]
fn dry_run_needs_no_credentials() {
    let cli = cli(&["--url", "https://example.com/", "--dry-run"]);
    let config = ValidatedConfig::from_raw(&cli, None, None).unwrap();

    assert!(config.telegram.is_none());
    assert!(config.dry_run);
}

#[test]
fn custom_template_is_compiled_and_kept_raw() {
    let cli = cli(&[
        "--url",
        "https://example.com/",
        "--dry-run",
        "--message-template",
        "{{url}} changed",
    ]);
    let config = ValidatedConfig::from_raw(&cli, None, None).unwrap();

    assert_eq!(config.message_template_raw.as_deref(), Some("{{url}} changed"));
    let msg = config.message_template.render(&config.url);
    assert_eq!(msg, "https://example.com/ changed");
}

#[test]
fn broken_template_is_rejected() {
    let cli = cli(&[
        "--url",
        "https://example.com/",
        "--dry-run",
        "--message-template",
        "{{#if}}",
    ]);
    let err = ValidatedConfig::from_raw(&cli, None, None).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidTemplate { .. }));
}

#[test]
fn to_settings_round_trips_effective_values() {
    let cli = cli(&[
        "--url",
        "https://example.com/page",
        "--interval",
        "45",
        "--token",
        "t",
        "--chat-id",
        "c",
    ]);
    let config = ValidatedConfig::from_raw(&cli, None, None).unwrap();
    let settings = config.to_settings();

    assert_eq!(settings.url.as_deref(), Some("https://example.com/page"));
    assert_eq!(settings.interval, Some(45));
    assert_eq!(settings.token.as_deref(), Some("t"));
    assert_eq!(settings.chat_id.as_deref(), Some("c"));
    assert!(settings.message_template.is_none());
}

#[test]
fn display_omits_the_token() {
    let cli = cli(&[
        "--url",
        "https://example.com/",
        "--token",
        "super-secret-token",
        "--chat-id",
        "42",
    ]);
    let config = ValidatedConfig::from_raw(&cli, None, None).unwrap();

    let rendered = config.to_string();
    assert!(!rendered.contains("super-secret-token"));
    assert!(rendered.contains("chat 42"));
}
