use sizeup_core::{ShapeKind, SymbolicPosition, Unit};
use sizeup_layout::SessionController;
use sizeup_settings::SettingsManager;
use tempfile::TempDir;

#[test]
fn test_saved_preferences_shape_the_stock_frame() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[preferences]
unit = "inches"
show_dimension_lines = false

[export]
file_name = "compare.png"
"#,
    )
    .unwrap();

    let settings = SettingsManager::with_path(&path);
    let session = SessionController::from_config(settings.config());
    assert_eq!(session.unit(), Unit::Inches);
    assert_eq!(session.position(), SymbolicPosition::Right);
    assert_eq!(session.distance_cm(), 30.0);
    assert!(session.export_path().ends_with("compare.png"));

    let frame = session.compose().unwrap();
    assert_eq!(frame.comparator.id, "desk");
    assert!(frame.comparator.annotations.is_empty());

    let target = frame.target.unwrap();
    assert!(target.annotations.is_empty());
    assert_eq!(target.anchor.x, 60.0 + 30.0 + 15.0);
    assert_eq!(frame.info.target_shape, Some(ShapeKind::Box));
    assert_eq!(
        frame.info.target_size.as_deref(),
        Some("11.8\" × 7.9\" × 5.9\"")
    );
}

#[test]
fn test_broken_preferences_give_stock_frame() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ \"preferences\": { \"unit\": \"furlongs\" } }").unwrap();

    let settings = SettingsManager::with_path(&path);
    let session = SessionController::from_config(settings.config());
    let stock = SessionController::new();
    assert_eq!(session.compose().unwrap(), stock.compose().unwrap());
}
