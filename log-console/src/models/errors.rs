use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 日志后端API调用相关错误
///
/// 处理与日志后端交互时的各种失败场景。
/// 同步控制器只区分"操作失败",这里保留细节用于日志记录。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ApiError {
    /// 网络请求失败
    ///
    /// 可能原因:
    /// - 网络连接中断
    /// - 后端服务不可达
    /// - 请求超时
    #[error("网络请求失败: {0}")]
    NetworkFailed(String),

    /// HTTP状态码错误
    ///
    /// 后端返回了非2xx状态码,响应体不做解析
    #[error("HTTP错误 {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    /// JSON解析失败
    ///
    /// 后端返回的数据格式不符合预期
    #[error("响应数据解析失败: {0}")]
    JsonParseFailed(String),

    /// 响应格式无效
    #[error("响应格式无效: {0}")]
    InvalidResponse(String),
}

/// 配置加载相关错误
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ConfigError {
    /// 无效的后端地址
    #[error("无效的后端地址: {0}")]
    InvalidUrl(String),

    /// 配置项取值无效
    #[error("配置项 {key} 取值无效: {value}")]
    InvalidValue { key: String, value: String },

    /// I/O错误
    ///
    /// 读取 .env 或创建日志目录时的文件系统错误
    #[error("I/O错误: {0}")]
    IoError(String),
}

/// 实现从reqwest::Error到ApiError的转换
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::NetworkFailed("请求超时".to_string())
        } else if err.is_connect() {
            ApiError::NetworkFailed("无法连接到服务器".to_string())
        } else if err.is_decode() {
            ApiError::JsonParseFailed(err.to_string())
        } else {
            ApiError::NetworkFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonParseFailed(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err.to_string())
    }
}
