//! 日志条目的展示格式: 时间、级别徽标与字段块

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::models::{Fields, LogLevel};

/// 本地时间展示格式
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 将 RFC 3339 时间戳转换为本地时区的展示字符串
///
/// 例: "2025-10-07T12:34:56Z" → "2025-10-07 20:34:56" (UTC+8)
/// 无法解析时原样返回,不报错。
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// 级别徽标: 大写级别名
///
/// 未知级别与 info 使用相同的样式宽度。
pub fn level_badge(level: &LogLevel) -> String {
    let label = level.as_str().to_uppercase();
    if level.is_known() {
        format!("[{:<5}]", label)
    } else {
        format!("[{}]", label)
    }
}

/// 字段块: 两空格缩进的JSON文本
pub fn fields_block(fields: &Fields) -> String {
    let value = Value::Object(fields.clone());
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

/// 为多行文本的每一行添加缩进
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}
