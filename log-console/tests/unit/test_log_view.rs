//! 日志视图单元测试
//!
//! 从后端JSON载入数据,验证过滤、展开与文本渲染。

use log_console::models::{LevelFilter, LogLevel, LogListResponse};
use log_console::services::log_view::EMPTY_MESSAGE;
use log_console::services::LogView;
use serde_json::json;

fn load(body: serde_json::Value) -> LogView {
    let response: LogListResponse = serde_json::from_value(body).unwrap();
    let mut view = LogView::new();
    view.replace_entries(response.logs);
    view
}

fn server_payload() -> serde_json::Value {
    json!({
        "logs": [
            {
                "timestamp": "2025-10-07T12:00:00Z",
                "level": "info",
                "message": "Sample info log",
                "service": "go-server",
                "fields": {"user_id": 123, "action": "login"}
            },
            {
                "timestamp": "2025-10-07T12:00:01Z",
                "level": "fatal",
                "message": "Unknown level",
                "service": "go-server",
                "fields": null
            },
            {
                "timestamp": "2025-10-07T12:00:02Z",
                "level": "error",
                "message": "Sample error log",
                "service": "go-server",
                "fields": {"user_id": 789, "action": "payment_failed"}
            }
        ]
    })
}

#[test]
fn test_unknown_level_only_visible_under_all() {
    let mut view = load(server_payload());
    assert_eq!(view.visible().len(), 3);
    assert_eq!(view.entries()[1].level, LogLevel::Other("fatal".into()));

    for level in LogLevel::KNOWN.iter() {
        view.set_filter(LevelFilter::Only(level.clone()));
        assert!(view.visible().iter().all(|e| e.level == *level));
    }
}

#[test]
fn test_null_fields_treated_as_empty() {
    let mut view = load(server_payload());
    assert!(view.entries()[1].fields.is_empty());
    assert!(!view.toggle_expand(1));
}

#[test]
fn test_filter_parsing() {
    assert_eq!("all".parse::<LevelFilter>(), Ok(LevelFilter::All));
    assert_eq!(
        "ERROR".parse::<LevelFilter>(),
        Ok(LevelFilter::Only(LogLevel::Error))
    );
    assert!("verbose".parse::<LevelFilter>().is_err());
}

#[test]
fn test_identical_entries_expand_independently() {
    let entry = json!({
        "timestamp": "2025-10-07T12:00:00Z",
        "level": "warn",
        "message": "Sample warning log",
        "service": "go-server",
        "fields": {"retry": 1}
    });
    let mut view = load(json!({"logs": [entry.clone(), entry]}));

    assert!(view.toggle_expand(1));
    assert!(!view.is_expanded(0));
    assert!(view.is_expanded(1));
}

#[test]
fn test_expansion_survives_refresh_with_prepended_entries() {
    let mut view = load(server_payload());
    view.toggle_expand(2);

    let mut body = server_payload();
    body["logs"].as_array_mut().unwrap().insert(
        0,
        json!({
            "timestamp": "2025-10-07T11:59:59Z",
            "level": "debug",
            "message": "newer",
            "service": "go-server",
            "fields": {}
        }),
    );
    let response: LogListResponse = serde_json::from_value(body).unwrap();
    view.replace_entries(response.logs);

    assert!(view.is_expanded(3));
    assert_eq!(
        view.expanded_entry().map(|e| e.message.as_str()),
        Some("Sample error log")
    );
}

#[test]
fn test_render_numbering_and_fields() {
    let mut view = load(server_payload());
    view.set_filter(LevelFilter::Only(LogLevel::Error));
    view.toggle_expand(0);

    let text = view.render(false, None);
    assert!(text.starts_with("Logs (filter: error, 1 of 3)"));
    assert!(text.contains("  1. [ERROR]"));
    assert!(text.contains("Sample error log"));
    assert!(text.contains("v fields (2)"));
    assert!(text.contains("\"action\": \"payment_failed\""));
    assert!(!text.contains("Sample info log"));
}

#[test]
fn test_render_empty() {
    let view = load(json!({"logs": []}));
    let text = view.render(false, None);
    assert!(text.contains(EMPTY_MESSAGE));
    assert!(text.contains("0 of 0"));
}
