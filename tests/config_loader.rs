use std::fs;

use tempfile::TempDir;
use trackindex::config::{Config, ConfigError};

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.bot.command_name, "trackindex");
    assert_eq!(config.bot.max_identifier_len, 100);
    assert_eq!(config.bot.embed_color, 0x0000FF);
    assert!(config.store.seed_path.is_none());
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("trackindex/config.toml"));
}

/// A missing file falls back to defaults.
#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

/// An empty file is valid: every section has defaults.
#[test]
fn test_empty_file_uses_defaults() {
    let (_dir, path) = write_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = write_config(
        r#"
[bot]
command_name = "tracks"
max_identifier_len = 80
embed_color = 0x00FF00

[store]
seed_path = "/srv/tracks.toml"

[logging]
level = "trackindex=debug"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.bot.command_name, "tracks");
    assert_eq!(config.bot.max_identifier_len, 80);
    assert_eq!(config.bot.embed_color, 0x00FF00);
    assert_eq!(
        config.store.seed_path.as_deref(),
        Some(std::path::Path::new("/srv/tracks.toml"))
    );
    assert_eq!(config.logging.level, "trackindex=debug");
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let (_dir, path) = write_config("[bot]\ncommand_name = \"tracks\"\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.bot.command_name, "tracks");
    assert_eq!(config.bot.max_identifier_len, 100);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = write_config("[bot\ncommand_name = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_reserved_command_name_fails_validation() {
    let (_dir, path) = write_config("[bot]\ncommand_name = \"Close\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn test_blank_command_name_fails_validation() {
    for name in ["", "track index"] {
        let mut config = Config::default();
        config.bot.command_name = name.to_string();
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "name: {name:?}"
        );
    }
}

#[test]
fn test_identifier_limit_bounds() {
    for len in [0, 31, 101, 4000] {
        let mut config = Config::default();
        config.bot.max_identifier_len = len;
        assert!(config.validate().is_err(), "len: {len}");
    }
    for len in [32, 100] {
        let mut config = Config::default();
        config.bot.max_identifier_len = len;
        assert!(config.validate().is_ok(), "len: {len}");
    }
}

#[test]
fn test_color_must_be_rgb() {
    let mut config = Config::default();
    config.bot.embed_color = 0x1000000;
    assert!(config.validate().is_err());
}
