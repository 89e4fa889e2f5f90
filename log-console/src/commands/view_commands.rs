//! 日志视图命令

use crate::models::LevelFilter;
use crate::state::AppState;

pub async fn set_filter(state: &AppState, filter: &str) -> Result<LevelFilter, String> {
    let filter: LevelFilter = filter.parse()?;
    state.view.lock().await.set_filter(filter.clone());

    let label = filter.to_string();
    crate::log_event!("FilterChanged", filter = label.as_str());
    Ok(filter)
}

/// 切换可见列表中第 `index` 项 (从0开始) 的展开状态,返回是否展开
pub async fn toggle_expand(state: &AppState, index: usize) -> bool {
    state.view.lock().await.toggle_expand(index)
}

pub async fn render_logs(state: &AppState) -> String {
    let error = state.sync.error().await;
    state
        .view
        .lock()
        .await
        .render(state.sync.loading(), error.as_deref())
}

/// 各级别数量摘要,例如 `info=3 warn=1 error=2 debug=0`
pub async fn level_summary(state: &AppState) -> String {
    state
        .view
        .lock()
        .await
        .level_counts()
        .iter()
        .map(|(level, count)| format!("{}={}", level, count))
        .collect::<Vec<_>>()
        .join(" ")
}
