use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::models::{
    ApiError, ConsoleConfig, LogEntry, LogListResponse, LogRequest, ServerStatus, SubmitAck,
};

/// 日志后端接口
///
/// 同步控制器只依赖这个接口,测试中用内存实现替换。
#[async_trait]
pub trait LogBackend: Send + Sync {
    /// `GET /logs`
    async fn list_logs(&self) -> Result<Vec<LogEntry>, ApiError>;

    /// `GET /generate-logs`,响应体忽略
    async fn generate_logs(&self) -> Result<(), ApiError>;

    /// `POST /logs`,确认响应尽力解析
    async fn submit_log(&self, request: &LogRequest) -> Result<Option<SubmitAck>, ApiError>;

    /// `GET /` 健康检查
    async fn server_status(&self) -> Result<ServerStatus, ApiError>;
}

/// 日志后端HTTP客户端
///
/// 职责:
/// - 拼接后端地址
/// - 发送请求并把非2xx状态统一映射为 `ApiError::HttpStatusError`
/// - 解析JSON响应
pub struct LogApiClient {
    client: Client,
    config: ConsoleConfig,
}

impl LogApiClient {
    /// 创建新的客户端
    ///
    /// # 错误
    /// - `ApiError::NetworkFailed`: HTTP客户端构建失败
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::NetworkFailed(format!("创建HTTP客户端失败: {}", e)))?;

        tracing::info!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.request_timeout_secs,
            "Log API client initialized"
        );

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// 检查状态码,非2xx响应体不做解析
    fn ensure_success(operation: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(
            operation,
            status = status.as_u16(),
            "Log backend returned non-success status"
        );
        Err(ApiError::HttpStatusError {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        })
    }

    async fn get(&self, operation: &str, path: &str) -> Result<Response, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(operation, url = %url, "Sending GET request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(operation, url = %url, error = %e, "Request failed");
            ApiError::from(e)
        })?;

        Self::ensure_success(operation, response)
    }
}

#[async_trait]
impl LogBackend for LogApiClient {
    async fn list_logs(&self) -> Result<Vec<LogEntry>, ApiError> {
        let response = self.get("list_logs", "/logs").await?;
        let body = response.bytes().await?;
        let logs = parse_log_list(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse log list response");
            e
        })?;

        tracing::debug!(count = logs.len(), "Log list received");
        Ok(logs)
    }

    async fn generate_logs(&self) -> Result<(), ApiError> {
        self.get("generate_logs", "/generate-logs").await?;
        tracing::info!("Sample log generation triggered");
        Ok(())
    }

    async fn submit_log(&self, request: &LogRequest) -> Result<Option<SubmitAck>, ApiError> {
        let url = self.config.endpoint("/logs");
        tracing::debug!(
            operation = "submit_log",
            url = %url,
            level = %request.level,
            field_count = request.fields.len(),
            "Sending POST request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Submit request failed");
                ApiError::from(e)
            })?;
        let response = Self::ensure_success("submit_log", response)?;

        // 确认响应仅用于日志记录,解析失败不影响结果
        let body = response.bytes().await.unwrap_or_default();
        let ack = serde_json::from_slice::<SubmitAck>(&body).ok();
        tracing::info!(ack = ?ack.as_ref().map(|a| &a.message), "Custom log submitted");
        Ok(ack)
    }

    async fn server_status(&self) -> Result<ServerStatus, ApiError> {
        let response = self.get("server_status", "/").await?;
        let body = response.bytes().await?;
        let status: ServerStatus = serde_json::from_slice(&body)?;
        Ok(status)
    }
}

/// 解析 `GET /logs` 响应体
///
/// - 不是JSON: `JsonParseFailed`
/// - 不是对象或缺少 `logs`: `InvalidResponse`
/// - `logs` 为 null 视为空列表
fn parse_log_list(body: &[u8]) -> Result<Vec<LogEntry>, ApiError> {
    let value: Value = serde_json::from_slice(body)?;
    match value.get("logs") {
        None => Err(ApiError::InvalidResponse("响应体缺少 logs 字段".to_string())),
        Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(_)) => {
            let parsed: LogListResponse = serde_json::from_value(value)?;
            Ok(parsed.logs)
        }
        Some(other) => Err(ApiError::InvalidResponse(format!(
            "logs 字段应为数组: {}",
            other
        ))),
    }
}
