use crate::models::{ApiError, ConsoleConfig};
use crate::services::{LogApiClient, LogBackend, LogComposer, LogView, SyncController};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 应用全局状态
///
/// 一次控制台会话内的全部组件:
/// - config: 启动时注入,之后只读
/// - sync: 日志集合、加载与错误状态的唯一写入者
/// - composer: 自定义日志表单
/// - view: 过滤与展开状态
pub struct AppState {
    pub config: ConsoleConfig,

    pub sync: Arc<SyncController<dyn LogBackend>>,

    pub composer: Mutex<LogComposer>,

    pub view: Mutex<LogView>,
}

impl AppState {
    /// 使用HTTP后端初始化应用状态
    ///
    /// # 错误处理
    /// HTTP客户端构建失败时返回 `ApiError::NetworkFailed`
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        let backend: Arc<dyn LogBackend> = Arc::new(LogApiClient::new(config.clone())?);
        Ok(Self::with_backend(config, backend))
    }

    /// 使用指定后端初始化 (测试中注入内存实现)
    pub fn with_backend(config: ConsoleConfig, backend: Arc<dyn LogBackend>) -> Self {
        tracing::info!(
            api_base_url = %config.api_base_url,
            "AppState initialized"
        );

        Self {
            config,
            sync: Arc::new(SyncController::new(backend)),
            composer: Mutex::new(LogComposer::new()),
            view: Mutex::new(LogView::new()),
        }
    }

    /// 将同步控制器中的最新集合推送到展示组件
    pub async fn refresh_view(&self) {
        let logs = self.sync.logs().await;
        self.view.lock().await.replace_entries(logs);
    }
}
