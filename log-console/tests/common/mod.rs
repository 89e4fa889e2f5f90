//! 测试公共模块
//!
//! 提供内存版日志后端和测试数据构造工具,所有契约/集成测试共用。
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};

use log_console::models::{
    ApiError, ConsoleConfig, Fields, LogEntry, LogLevel, LogRequest, ServerStatus, SubmitAck,
};
use log_console::services::LogBackend;
use log_console::state::AppState;

type ListReply = Result<Vec<LogEntry>, ApiError>;

/// Mock日志后端
///
/// 行为与真实服务一致:
/// - list: 返回内存中的全部日志
/// - generate: 追加4条样例日志 (每个级别一条)
/// - submit: 由请求构造日志并追加,填充时间戳与服务名
///
/// 额外能力:
/// - 各接口调用计数
/// - 按接口模拟失败 (HTTP 500)
/// - 拉取闸门: 挂起下一次 list 调用,直到测试给出响应
pub struct MockLogBackend {
    logs: Mutex<Vec<LogEntry>>,
    submitted: Mutex<Vec<LogRequest>>,
    gates: Mutex<VecDeque<oneshot::Receiver<ListReply>>>,

    list_calls: AtomicUsize,
    generate_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,

    fail_list: AtomicBool,
    fail_generate: AtomicBool,
    fail_submit: AtomicBool,
    fail_status: AtomicBool,

    clock: AtomicUsize,
}

impl MockLogBackend {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            gates: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            fail_list: AtomicBool::new(false),
            fail_generate: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
            fail_status: AtomicBool::new(false),
            clock: AtomicUsize::new(0),
        }
    }

    /// 预置日志数据
    pub fn with_logs(logs: Vec<LogEntry>) -> Self {
        Self {
            logs: Mutex::new(logs),
            ..Self::new()
        }
    }

    pub async fn set_logs(&self, logs: Vec<LogEntry>) {
        *self.logs.lock().await = logs;
    }

    pub async fn stored_logs(&self) -> Vec<LogEntry> {
        self.logs.lock().await.clone()
    }

    pub async fn submitted(&self) -> Vec<LogRequest> {
        self.submitted.lock().await.clone()
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_generate(&self, fail: bool) {
        self.fail_generate.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_status(&self, fail: bool) {
        self.fail_status.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// 挂起下一次 list 调用,返回用于放行的发送端
    pub async fn hold_next_list(&self) -> oneshot::Sender<ListReply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.push_back(rx);
        tx
    }

    fn next_timestamp(&self) -> String {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        format!("2025-10-07T12:{:02}:{:02}Z", (tick / 60) % 60, tick % 60)
    }

    fn server_error() -> ApiError {
        ApiError::HttpStatusError {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }
}

#[async_trait]
impl LogBackend for MockLogBackend {
    async fn list_logs(&self) -> Result<Vec<LogEntry>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().await.pop_front();
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(ApiError::NetworkFailed("gate dropped".to_string())));
        }

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        Ok(self.logs.lock().await.clone())
    }

    async fn generate_logs(&self) -> Result<(), ApiError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_generate.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let samples = vec![
            sample_entry(LogLevel::Info, "Sample info log", json!({"user_id": 123, "action": "login"})),
            sample_entry(LogLevel::Warn, "Sample warning log", json!({"user_id": 456, "action": "retry"})),
            sample_entry(
                LogLevel::Error,
                "Sample error log",
                json!({"user_id": 789, "action": "payment_failed"}),
            ),
            sample_entry(LogLevel::Debug, "Sample debug log", json!({"trace": "abc"})),
        ];
        let mut logs = self.logs.lock().await;
        for mut entry in samples {
            entry.timestamp = self.next_timestamp();
            logs.push(entry);
        }
        Ok(())
    }

    async fn submit_log(&self, request: &LogRequest) -> Result<Option<SubmitAck>, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let timestamp = self.next_timestamp();
        self.submitted.lock().await.push(request.clone());
        self.logs.lock().await.push(LogEntry {
            timestamp: timestamp.clone(),
            level: request.level.clone(),
            message: request.message.clone(),
            service: "go-server".to_string(),
            fields: request.fields.clone(),
        });

        Ok(Some(SubmitAck {
            message: "Log received".to_string(),
            timestamp: Some(timestamp),
        }))
    }

    async fn server_status(&self) -> Result<ServerStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        Ok(ServerStatus {
            message: "Go Logging Server is running".to_string(),
            version: Some("1.0.0".to_string()),
            time: Some("2025-10-07T12:00:00Z".to_string()),
            github: None,
        })
    }
}

/// 构造一条测试日志
pub fn sample_entry(level: LogLevel, message: &str, fields: serde_json::Value) -> LogEntry {
    LogEntry {
        timestamp: "2025-10-07T12:00:00Z".to_string(),
        level,
        message: message.to_string(),
        service: "go-server".to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

/// 构造一条没有附加字段的测试日志
pub fn bare_entry(level: LogLevel, message: &str) -> LogEntry {
    LogEntry {
        timestamp: "2025-10-07T12:00:00Z".to_string(),
        level,
        message: message.to_string(),
        service: "go-server".to_string(),
        fields: Fields::new(),
    }
}

/// 使用Mock后端构造应用状态
pub fn test_state(backend: Arc<MockLogBackend>) -> AppState {
    AppState::with_backend(ConsoleConfig::default(), backend)
}

/// 等待直到条件成立 (用于等待后台任务进入挂起点)
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
