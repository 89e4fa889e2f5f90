//! 结构化日志控制台
//!
//! 查看、过滤远端日志后端返回的日志流,触发样例日志生成,
//! 以及编辑并提交自定义结构化日志。

pub mod commands;
pub mod console;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
