//! 服务层模块
//!
//! 包含所有业务逻辑服务:
//! - `field_editor`: 自定义字段草稿的增删改与类型转换
//! - `log_composer`: 自定义日志表单状态机
//! - `log_view`: 级别过滤、展开状态与文本渲染
//! - `sync_controller`: 拉取/生成/提交的协调者,维护加载与错误状态
//! - `log_api`: 日志后端HTTP客户端
//! - `config_service`: 启动配置加载
//!
//! # 服务架构
//!
//! ```text
//! ┌─────────────────┐
//! │    Commands     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────┐
//! │         Services Layer               │
//! │  ┌──────────────┐  ┌──────────────┐ │
//! │  │ LogComposer  │  │   LogView    │ │
//! │  │ (FieldEditor)│  │              │ │
//! │  └──────┬───────┘  └──────▲───────┘ │
//! │         │                 │         │
//! │  ┌──────▼─────────────────┴───────┐ │
//! │  │       SyncController            │ │
//! │  └──────────────┬─────────────────┘ │
//! └─────────────────┼────────────────────┘
//!                   ▼
//!          LogBackend (LogApiClient)
//! ```
//!
//! # 使用示例
//!
//! ```no_run
//! use log_console::models::ConsoleConfig;
//! use log_console::services::{LogApiClient, LogComposer, LogView, SyncController};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConsoleConfig::new("http://localhost:8080")?;
//! let sync = SyncController::new(Arc::new(LogApiClient::new(config)?));
//!
//! sync.fetch_logs().await;
//!
//! let mut composer = LogComposer::new();
//! composer.toggle_form();
//! composer.set_message("disk full");
//! composer.submit(&sync).await;
//!
//! let mut view = LogView::new();
//! view.replace_entries(sync.logs().await);
//! println!("{}", view.render(sync.loading(), sync.error().await.as_deref()));
//! # Ok(())
//! # }
//! ```

pub mod config_service;
pub mod field_editor;
pub mod log_api;
pub mod log_composer;
pub mod log_view;
pub mod sync_controller;

// 重导出常用类型,简化外部引用
pub use config_service::{ConfigOverrides, ConfigService};
pub use field_editor::FieldEditor;
pub use log_api::{LogApiClient, LogBackend};
pub use log_composer::{ComposerState, LogComposer, SubmitOutcome};
pub use log_view::LogView;
pub use sync_controller::{SyncController, SyncOutcome, SyncSnapshot};
