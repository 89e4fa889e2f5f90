//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - errors: 错误类型定义 (API调用、配置加载)
//! - log_entry: 日志条目与提交请求
//! - field_draft: 自定义字段草稿
//! - console_config: 控制台配置

pub mod console_config;
pub mod errors;
pub mod field_draft;
pub mod log_entry;

// 重导出常用类型,简化外部引用
pub use console_config::ConsoleConfig;
pub use errors::{ApiError, ConfigError};
pub use field_draft::{DraftId, FieldDraft};
pub use log_entry::{
    EntryId, Fields, LevelFilter, LogEntry, LogLevel, LogListResponse, LogRequest,
    ServerStatus, SubmitAck,
};
