//! 同步控制器
//!
//! 唯一负责修改 `logs` / `loading` / `error` 三元组的组件。
//! 其他组件只读取快照,或通过这里发起变更。
//!
//! # 并发约定
//! - `loading` 由在途请求计数推导,守卫在任何退出路径上释放计数
//! - 每次拉取分配递增序号,只有最新序号的响应会被应用

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::log_api::LogBackend;
use crate::models::{LogEntry, LogRequest, ServerStatus};

pub const FETCH_FAILED: &str = "Failed to fetch logs";
pub const GENERATE_FAILED: &str = "Failed to generate logs";
pub const SEND_FAILED: &str = "Failed to send log";
pub const STATUS_FAILED: &str = "Failed to reach server";

/// 对外暴露的状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub logs: Vec<LogEntry>,
}

/// 单次操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// 成功: 拉取结果已应用,或变更请求已被后端接受
    Applied,
    /// 失败,已记录错误信息
    Failed,
    /// 拉取已被更新的请求取代,结果被丢弃
    Superseded,
}

impl SyncOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

#[derive(Debug, Default)]
struct SharedState {
    error: Option<String>,
    logs: Vec<LogEntry>,
}

/// 在途请求守卫,drop时释放计数
struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 同步控制器
pub struct SyncController<B: LogBackend + ?Sized> {
    backend: Arc<B>,
    state: RwLock<SharedState>,
    in_flight: AtomicUsize,
    latest_fetch: AtomicU64,
}

impl<B: LogBackend + ?Sized> SyncController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: RwLock::new(SharedState::default()),
            in_flight: AtomicUsize::new(0),
            latest_fetch: AtomicU64::new(0),
        }
    }

    pub fn loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn logs(&self) -> Vec<LogEntry> {
        self.state.read().await.logs.clone()
    }

    pub async fn snapshot(&self) -> SyncSnapshot {
        let state = self.state.read().await;
        SyncSnapshot {
            loading: self.loading(),
            error: state.error.clone(),
            logs: state.logs.clone(),
        }
    }

    async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn set_error(&self, message: &str) {
        self.state.write().await.error = Some(message.to_string());
    }

    /// 拉取日志列表
    ///
    /// 成功时整体替换 `logs`; 失败时设置固定错误信息, `logs` 保持不变。
    /// 被更新的拉取取代时,无论成功失败都不修改状态。
    pub async fn fetch_logs(&self) -> SyncOutcome {
        let seq = self.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlightGuard::acquire(&self.in_flight);
        self.clear_error().await;

        let result = self.backend.list_logs().await;

        let latest = self.latest_fetch.load(Ordering::SeqCst);
        if seq != latest {
            tracing::debug!(seq, latest, "Discarding superseded log fetch");
            return SyncOutcome::Superseded;
        }

        match result {
            Ok(logs) => {
                tracing::info!(seq, count = logs.len(), "Logs refreshed");
                self.state.write().await.logs = logs;
                SyncOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "Log fetch failed");
                self.set_error(FETCH_FAILED).await;
                SyncOutcome::Failed
            }
        }
    }

    /// 触发后端生成样例日志,成功后立即重新拉取
    ///
    /// 返回值反映生成请求本身; 重新拉取的结果体现在快照中。
    pub async fn generate_logs(&self) -> SyncOutcome {
        let _guard = InFlightGuard::acquire(&self.in_flight);
        self.clear_error().await;

        match self.backend.generate_logs().await {
            Ok(()) => {
                self.fetch_logs().await;
                SyncOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "Log generation failed");
                self.set_error(GENERATE_FAILED).await;
                SyncOutcome::Failed
            }
        }
    }

    /// 提交自定义日志,成功后立即重新拉取
    pub async fn send_custom_log(&self, request: &LogRequest) -> SyncOutcome {
        let _guard = InFlightGuard::acquire(&self.in_flight);
        self.clear_error().await;

        match self.backend.submit_log(request).await {
            Ok(_) => {
                self.fetch_logs().await;
                SyncOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, level = %request.level, "Custom log submission failed");
                self.set_error(SEND_FAILED).await;
                SyncOutcome::Failed
            }
        }
    }

    /// 查询后端健康状态,不触发重新拉取
    pub async fn server_status(&self) -> Option<ServerStatus> {
        let _guard = InFlightGuard::acquire(&self.in_flight);
        self.clear_error().await;

        match self.backend.server_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                self.set_error(STATUS_FAILED).await;
                None
            }
        }
    }
}
