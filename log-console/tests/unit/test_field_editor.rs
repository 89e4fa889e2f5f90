//! 字段编辑器单元测试
//!
//! 覆盖编辑器与表单的协作、越界操作,以及提交时的值转换规则。

use log_console::models::LogLevel;
use log_console::services::field_editor::coerce_value;
use log_console::services::{FieldEditor, LogComposer};
use serde_json::{json, Value};

#[test]
fn test_build_request_uses_editor_fields() {
    let mut composer = LogComposer::new();
    composer.toggle_form();
    composer.set_message("disk full");
    composer.set_level(LogLevel::Error);

    let editor = composer.editor_mut();
    let disk = editor.add_field();
    let host = editor.add_field();
    editor.update_by_id(disk, "disk", "80");
    editor.update_by_id(host, "host", "db-1");

    let request = composer.build_request();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "message": "disk full",
            "level": "error",
            "fields": {"disk": 80, "host": "db-1"}
        })
    );
}

#[test]
fn test_collapsing_form_discards_drafts_but_ids_keep_growing() {
    let mut composer = LogComposer::new();
    composer.toggle_form();
    let before = composer.editor_mut().add_field();

    composer.toggle_form();
    assert!(composer.editor().is_empty());
    assert_eq!(composer.message(), "");

    composer.toggle_form();
    let after = composer.editor_mut().add_field();
    assert!(after > before);
}

#[test]
fn test_out_of_range_is_noop() {
    let mut editor = FieldEditor::new();
    editor.add_field();

    assert!(!editor.update_field(5, "k", "v"));
    assert!(editor.remove_field(5).is_none());
    assert_eq!(editor.len(), 1);
    assert_eq!(editor.drafts()[0].key, "");
}

#[test]
fn test_field_map_drops_incomplete_and_last_write_wins() {
    let mut editor = FieldEditor::new();
    for _ in 0..4 {
        editor.add_field();
    }
    editor.update_field(0, "user", "alice");
    editor.update_field(1, "", "orphan");
    editor.update_field(2, "dangling", "");
    editor.update_field(3, "user", "bob");

    let fields = editor.to_field_map();
    assert_eq!(Value::Object(fields), json!({"user": "bob"}));
}

#[test]
fn test_empty_editor_gives_empty_map() {
    assert!(FieldEditor::new().to_field_map().is_empty());
}

#[test]
fn test_coerce_value_rules() {
    assert_eq!(coerce_value("80"), json!(80));
    assert_eq!(coerce_value("-7"), json!(-7));
    assert_eq!(coerce_value(" 42 "), json!(42));
    assert_eq!(coerce_value("4.5"), json!(4.5));
    assert_eq!(coerce_value("1e3"), json!(1000));
    assert_eq!(coerce_value("2.0"), json!(2));

    assert_eq!(coerce_value("42abc"), json!("42abc"));
    assert_eq!(coerce_value("0x1F"), json!("0x1F"));
    assert_eq!(coerce_value("inf"), json!("inf"));
    assert_eq!(coerce_value("NaN"), json!("NaN"));
    assert_eq!(coerce_value("   "), json!("   "));
    assert_eq!(coerce_value("eu-west"), json!("eu-west"));
}
