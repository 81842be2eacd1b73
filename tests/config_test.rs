// tests/config_test.rs
use git_changelog::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
    assert_eq!(config.changelog.title, "# Changelog");
    assert_eq!(config.version.default_version, "0.1.0");
    assert!(config.behavior.staged);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[changelog]
description = "Every release, newest first."

[version]
default_version = "0.0.1"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.changelog.description, "Every release, newest first.");
    assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
    assert_eq!(config.version.default_version, "0.0.1");
}

#[test]
#[serial]
fn test_load_fixture() {
    let config = load_config(Some(Path::new("tests/fixtures/config_working_tree.toml")))
        .expect("Failed to load test config");
    assert_eq!(config.changelog.path, PathBuf::from("docs/CHANGES.md"));
    assert_eq!(config.changelog.title, "# Release Notes");
    assert!(!config.behavior.staged);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[behavior]\nstaged = \"yes\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(err.to_string().contains("Failed to parse configuration"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    assert!(load_config(Some(Path::new("does/not/exist.toml"))).is_err());
}

#[test]
#[serial]
fn test_project_file_in_current_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[changelog]\npath = \"HISTORY.md\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().changelog.path, PathBuf::from("HISTORY.md"));
}
