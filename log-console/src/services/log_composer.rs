//! 自定义日志编辑器
//!
//! 状态机:
//! ```text
//! Collapsed --toggle_form--> Expanded
//!     ^                         |
//!     +---- toggle_form / 提交成功 ----+
//! ```
//! 收起表单会丢弃已输入的内容; 提交失败时保留输入,便于重试。

use super::field_editor::FieldEditor;
use super::log_api::LogBackend;
use super::sync_controller::SyncController;
use crate::models::{LogLevel, LogRequest};

/// 表单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Collapsed,
    Expanded,
}

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 已发送并完成重新拉取,表单已重置
    Sent,
    /// 发送失败,输入被保留
    Failed,
    /// 前置条件不满足,未发送
    Rejected,
}

#[derive(Debug, Default)]
pub struct LogComposer {
    state: ComposerState,
    message: String,
    level: LogLevel,
    editor: FieldEditor,
}

impl LogComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == ComposerState::Expanded
    }

    /// 切换表单展开/收起,收起时丢弃草稿
    pub fn toggle_form(&mut self) -> ComposerState {
        self.state = match self.state {
            ComposerState::Collapsed => ComposerState::Expanded,
            ComposerState::Expanded => {
                self.reset();
                ComposerState::Collapsed
            }
        };
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn level(&self) -> &LogLevel {
        &self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn editor(&self) -> &FieldEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut FieldEditor {
        &mut self.editor
    }

    /// 提交按钮是否可用: 表单展开、消息非空且没有在途请求
    pub fn can_submit(&self, loading: bool) -> bool {
        self.is_expanded() && !self.message.trim().is_empty() && !loading
    }

    /// 打包当前输入为提交请求
    pub fn build_request(&self) -> LogRequest {
        LogRequest {
            message: self.message.clone(),
            level: self.level.clone(),
            fields: self.editor.to_field_map(),
        }
    }

    /// 提交当前输入
    ///
    /// 成功: 清空消息与草稿并收起表单。
    /// 失败: 保留全部输入,表单保持展开。
    pub async fn submit<B: LogBackend + ?Sized>(
        &mut self,
        sync: &SyncController<B>,
    ) -> SubmitOutcome {
        if !self.can_submit(sync.loading()) {
            tracing::debug!(
                state = ?self.state,
                message_empty = self.message.trim().is_empty(),
                "Submit rejected"
            );
            return SubmitOutcome::Rejected;
        }

        let request = self.build_request();
        tracing::info!(
            level = %request.level,
            field_count = request.fields.len(),
            "Submitting custom log"
        );

        if sync.send_custom_log(&request).await.is_applied() {
            self.reset();
            self.state = ComposerState::Collapsed;
            SubmitOutcome::Sent
        } else {
            SubmitOutcome::Failed
        }
    }

    /// 清空消息与草稿; 级别选择保留到下一次编辑
    fn reset(&mut self) {
        self.message.clear();
        self.editor.clear();
    }
}
