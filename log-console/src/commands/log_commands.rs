//! 日志同步命令
//!
//! 每个命令结束后都把同步控制器中的集合推送到展示组件,
//! 保证视图始终反映后端状态。

use crate::models::ServerStatus;
use crate::state::AppState;
use crate::services::SyncOutcome;

/// 拉取日志列表,返回当前日志总数
#[tracing::instrument(skip(state))]
pub async fn fetch_logs(state: &AppState) -> Result<usize, String> {
    let outcome = state.sync.fetch_logs().await;
    finish(state, outcome).await
}

/// 触发样例日志生成并重新拉取
#[tracing::instrument(skip(state))]
pub async fn generate_logs(state: &AppState) -> Result<usize, String> {
    let outcome = state.sync.generate_logs().await;
    finish(state, outcome).await
}

/// 查询后端健康状态
pub async fn server_status(state: &AppState) -> Result<ServerStatus, String> {
    match state.sync.server_status().await {
        Some(status) => Ok(status),
        None => Err(state.sync.error().await.unwrap_or_default()),
    }
}

/// 同步视图并把控制器记录的错误转换为命令错误
///
/// 生成成功但随后的重新拉取失败时,返回拉取的错误信息。
async fn finish(state: &AppState, outcome: SyncOutcome) -> Result<usize, String> {
    state.refresh_view().await;

    if let Some(error) = state.sync.error().await {
        return Err(error);
    }

    let total = state.view.lock().await.entries().len();
    tracing::debug!(?outcome, total, "Command finished");
    Ok(total)
}
