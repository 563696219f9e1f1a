//! Integration tests for toolpath file records on disk.

use bridgecam_core::{BoardSide, Color};
use bridgecam_designer::{path_from_points, ItemType, Point, ToolpathFile};
use tempfile::TempDir;

fn sample() -> ToolpathFile {
    let mut file = ToolpathFile::new(42, "/work/board/top.gbr", ItemType::Gerber);
    file.lines_mut().push("%FSLAX26Y26*%".to_string());
    file.lines_mut().push("M02*".to_string());
    file.set_grouped_paths(vec![
        vec![path_from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])],
        vec![path_from_points(&[
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
            Point::new(6.0, 6.0),
        ])],
    ]);
    file.set_side(BoardSide::Bottom);
    file.set_color(Color::rgba(200, 100, 0, 128));
    file.create_items();
    file
}

#[test]
fn test_save_and_load_preserves_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("top.json");

    let mut original = sample();
    original.item_group_mut().set_visible(false);
    original.save_to_file(&path).unwrap();

    let loaded = ToolpathFile::load_from_file(&path, ItemType::Gerber).unwrap();
    assert_eq!(loaded.id(), 42);
    assert_eq!(loaded.lines(), original.lines());
    assert_eq!(loaded.name(), "/work/board/top.gbr");
    assert_eq!(loaded.short_name(), "top.gbr");
    assert_eq!(loaded.grouped_paths(), original.grouped_paths());
    assert_eq!(loaded.merged_paths().len(), 2);
    assert_eq!(loaded.side(), BoardSide::Bottom);
    assert_eq!(loaded.color(), Color::rgba(200, 100, 0, 128));
    assert_eq!(loaded.date(), original.date());
    assert_eq!(loaded.kind(), ItemType::Gerber);

    assert_eq!(loaded.item_group().len(), 2);
    assert!(!loaded.item_group().is_visible());
}

#[test]
fn test_visible_flag_is_last_element() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("record.json");
    sample().save_to_file(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let fields = value.as_array().unwrap();
    assert_eq!(fields.last(), Some(&serde_json::Value::Bool(true)));
    assert_eq!(fields[0], 42);
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = ToolpathFile::load_from_file(temp_dir.path().join("missing.json"), ItemType::Raw);
    assert!(matches!(
        result,
        Err(bridgecam_designer::DesignerError::Io(_))
    ));
}
