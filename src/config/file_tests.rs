use super::ConfigError;
use super::file::{SettingsFile, write_template};

fn sample() -> SettingsFile {
    SettingsFile {
        url: Some("https://example.com/page".to_string()),
        interval: Some(120),
        token: Some("123:abc".to_string()),
        chat_id: Some("42".to_string()),
        message_template: None,
    }
}

#[test]
fn save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    sample().save(&path).unwrap();
    let loaded = SettingsFile::load(&path).unwrap();

    assert_eq!(loaded, sample());
}

#[test]
fn absent_fields_are_omitted_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    sample().save(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert!(content.contains("\"url\""));
    assert!(!content.contains("message_template"));
}

#[test]
fn load_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SettingsFile::load(&dir.path().join("absent.json")).unwrap_err();

    assert!(matches!(err, ConfigError::FileRead { .. }));
}

#[test]
fn load_optional_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = SettingsFile::load_optional(&dir.path().join("absent.json")).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn load_optional_corrupt_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = SettingsFile::load_optional(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileParse { .. }));
}

#[test]
fn unknown_fields_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"url": "https://example.com", "extra": 1}"#).unwrap();

    let loaded = SettingsFile::load(&path).unwrap();
    assert_eq!(loaded.url.as_deref(), Some("https://example.com"));
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("config.json");

    sample().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    sample().save(&path).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, ["config.json"]);
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    sample().save(&path).unwrap();
    let mut updated = sample();
    updated.interval = Some(600);
    updated.save(&path).unwrap();

    let loaded = SettingsFile::load(&path).unwrap();
    assert_eq!(loaded.interval, Some(600));
}

#[test]
fn template_has_placeholders_for_required_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pagewatch.json");

    write_template(&path).unwrap();
    let loaded = SettingsFile::load(&path).unwrap();

    assert!(loaded.url.is_some());
    assert!(loaded.token.is_some());
    assert!(loaded.chat_id.is_some());
    assert_eq!(loaded.interval, Some(super::defaults::INTERVAL_SECS));
}
