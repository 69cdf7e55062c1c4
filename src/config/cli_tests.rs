use std::path::PathBuf;

use super::cli::{Cli, Command};

#[test]
fn no_arguments_parses_to_empty_run() {
    let cli = Cli::parse_from_iter(["pagewatch"]);

    assert!(cli.command.is_none());
    assert!(cli.url.is_none());
    assert!(cli.interval.is_none());
    assert!(cli.token.is_none());
    assert!(cli.chat_id.is_none());
    assert!(cli.config.is_none());
    assert!(!cli.save);
    assert!(!cli.dry_run);
    assert!(!cli.verbose);
}

#[test]
fn run_arguments_parse() {
    let cli = Cli::parse_from_iter([
        "pagewatch",
        "--url",
        "https://example.com/page",
        "--interval",
        "60",
        "--token",
        "123:abc",
        "--chat-id",
        "42",
        "--verbose",
    ]);

    assert_eq!(cli.url.as_deref(), Some("https://example.com/page"));
    assert_eq!(cli.interval, Some(60));
    assert_eq!(cli.token.as_deref(), Some("123:abc"));
    assert_eq!(cli.chat_id.as_deref(), Some("42"));
    assert!(cli.verbose);
}

#[test]
fn init_subcommand_with_default_output() {
    let cli = Cli::parse_from_iter(["pagewatch", "init"]);

    assert!(cli.is_init());
    match cli.command {
        Some(Command::Init { output }) => {
            assert_eq!(output, PathBuf::from("pagewatch.json"));
        }
        other => panic!("expected init, got {other:?}"),
    }
}

#[test]
fn init_subcommand_with_explicit_output() {
    let cli = Cli::parse_from_iter(["pagewatch", "init", "--output", "/tmp/settings.json"]);

    match cli.command {
        Some(Command::Init { output }) => {
            assert_eq!(output, PathBuf::from("/tmp/settings.json"));
        }
        other => panic!("expected init, got {other:?}"),
    }
}

#[test]
fn test_subcommand_accepts_global_flags() {
    let cli = Cli::parse_from_iter(["pagewatch", "test", "--token", "t", "--chat-id", "c"]);

    assert!(matches!(cli.command, Some(Command::Test)));
    assert_eq!(cli.token.as_deref(), Some("t"));
    assert_eq!(cli.chat_id.as_deref(), Some("c"));
}

#[test]
fn config_short_flag() {
    let cli = Cli::parse_from_iter(["pagewatch", "-c", "custom.json"]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
}

#[test]
fn dry_run_and_save_flags() {
    let cli = Cli::parse_from_iter(["pagewatch", "--dry-run", "--save"]);
    assert!(cli.dry_run);
    assert!(cli.save);
}
