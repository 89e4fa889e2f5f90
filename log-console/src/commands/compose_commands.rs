//! 自定义日志表单命令

use crate::models::{DraftId, LogLevel};
use crate::services::{ComposerState, SubmitOutcome};
use crate::state::AppState;

/// 展开/收起表单
pub async fn toggle_compose_form(state: &AppState) -> ComposerState {
    state.composer.lock().await.toggle_form()
}

/// 确保表单处于展开状态,编辑操作前调用
async fn require_expanded(state: &AppState) -> Result<(), String> {
    if state.composer.lock().await.is_expanded() {
        Ok(())
    } else {
        Err("Custom log form is collapsed; run `compose` first".to_string())
    }
}

pub async fn set_compose_message(state: &AppState, message: &str) -> Result<(), String> {
    require_expanded(state).await?;
    state.composer.lock().await.set_message(message);
    Ok(())
}

pub async fn set_compose_level(state: &AppState, level: &str) -> Result<LogLevel, String> {
    require_expanded(state).await?;
    let level: LogLevel = level.parse()?;
    state.composer.lock().await.set_level(level.clone());
    Ok(level)
}

pub async fn add_field(state: &AppState) -> Result<DraftId, String> {
    require_expanded(state).await?;
    Ok(state.composer.lock().await.editor_mut().add_field())
}

/// 按位置更新草稿,越界时返回 `Ok(false)` 而不是报错
pub async fn update_field(
    state: &AppState,
    position: usize,
    key: &str,
    value: &str,
) -> Result<bool, String> {
    require_expanded(state).await?;
    Ok(state
        .composer
        .lock()
        .await
        .editor_mut()
        .update_field(position, key, value))
}

pub async fn remove_field(state: &AppState, position: usize) -> Result<bool, String> {
    require_expanded(state).await?;
    Ok(state
        .composer
        .lock()
        .await
        .editor_mut()
        .remove_field(position)
        .is_some())
}

/// 提交自定义日志
///
/// 成功后视图已反映重新拉取的结果; 失败时表单内容保留。
#[tracing::instrument(skip(state))]
pub async fn submit_custom_log(state: &AppState) -> Result<(), String> {
    let outcome = {
        let mut composer = state.composer.lock().await;
        composer.submit(state.sync.as_ref()).await
    };
    state.refresh_view().await;

    match outcome {
        SubmitOutcome::Sent => {
            let total = state.view.lock().await.entries().len();
            crate::log_event!("CustomLogSent", total = total);
            Ok(())
        }
        SubmitOutcome::Failed => Err(state.sync.error().await.unwrap_or_default()),
        SubmitOutcome::Rejected => Err("A message is required before sending".to_string()),
    }
}

/// 表单内容的文本视图
pub async fn render_form(state: &AppState) -> String {
    let composer = state.composer.lock().await;
    if !composer.is_expanded() {
        return "Custom log form: collapsed".to_string();
    }

    let mut lines = vec![
        "Custom log form:".to_string(),
        format!("  message: {}", composer.message()),
        format!("  level:   {}", composer.level()),
    ];
    if composer.editor().is_empty() {
        lines.push("  fields:  (none)".to_string());
    } else {
        lines.push("  fields:".to_string());
        for (i, draft) in composer.editor().drafts().iter().enumerate() {
            lines.push(format!("    {}. {} : {}", i + 1, draft.key, draft.value));
        }
    }
    lines.join("\n")
}
