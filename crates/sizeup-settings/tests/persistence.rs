use sizeup_core::Unit;
use sizeup_settings::{Config, ConfigError, SettingsError, SettingsManager};
use std::path::PathBuf;
use tempfile::TempDir;

fn customized() -> Config {
    let mut config = Config::new();
    config.preferences.unit = Unit::Inches;
    config.preferences.show_dimension_lines = false;
    config.export.file_name = "desk-vs-box.png".to_string();
    config.export.directory = Some(PathBuf::from("/tmp/exports"));
    config
}

#[test]
fn test_toml_persists_preferences() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(
        loaded.export.output_path(),
        PathBuf::from("/tmp/exports/desk-vs-box.png")
    );

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[preferences]"));
    assert!(!written.contains("distance"));
}

#[test]
fn test_json_persists_preferences() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    assert!(matches!(
        Config::new().save_to_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_unreadable_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    match Config::load_from_file(&path) {
        Err(SettingsError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {:?}", other),
    }
}

#[test]
fn test_manager_defaults_when_missing() {
    let dir = TempDir::new().unwrap();
    let manager = SettingsManager::with_path(dir.path().join("absent.toml"));
    assert_eq!(manager.config(), &Config::default());
}

#[test]
fn test_manager_ignores_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[export]\nfile_name = \"\"\n").unwrap();

    let manager = SettingsManager::with_path(&path);
    assert_eq!(manager.config(), &Config::default());
}

#[test]
fn test_manager_save_creates_parent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut manager = SettingsManager::with_path(&path);
    manager.config_mut().preferences.unit = Unit::Inches;
    manager.save().unwrap();

    let reloaded = SettingsManager::with_path(&path);
    assert_eq!(reloaded.config().preferences.unit, Unit::Inches);
}
