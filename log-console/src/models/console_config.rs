use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigError;

/// 默认后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// 默认请求超时 (秒)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 控制台配置
///
/// 启动时构造一次并注入 `AppState`,运行期间不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// 日志后端地址,不带末尾斜杠
    ///
    /// 示例: "http://localhost:8080", "https://logs.example.com/api"
    pub api_base_url: String,

    /// 单次请求超时 (秒)
    pub request_timeout_secs: u64,

    /// 本地运行日志目录
    pub log_dir: PathBuf,
}

impl ConsoleConfig {
    /// 创建新配置,校验并规范化后端地址
    ///
    /// # 示例
    /// ```
    /// use log_console::models::ConsoleConfig;
    ///
    /// let config = ConsoleConfig::new("http://localhost:8080/").unwrap();
    /// assert_eq!(config.api_base_url, "http://localhost:8080");
    /// ```
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: default_log_dir(),
        })
    }

    /// 设置请求超时 (构建器模式)
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// 设置日志目录 (构建器模式)
    pub fn with_log_dir(mut self, log_dir: PathBuf) -> Self {
        self.log_dir = log_dir;
        self
    }

    /// 拼接后端路径
    ///
    /// ```
    /// use log_console::models::ConsoleConfig;
    ///
    /// let config = ConsoleConfig::new("http://localhost:8080").unwrap();
    /// assert_eq!(config.endpoint("/logs"), "http://localhost:8080/logs");
    /// ```
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: default_log_dir(),
        }
    }
}

/// 默认日志目录: <数据目录>/log-console/logs,无法获取时回退到 ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("log-console").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// 校验后端地址: 只接受 http/https 且主机非空
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidUrl(format!("仅支持 http/https: {}", raw)))?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || host.starts_with(':') {
        return Err(ConfigError::InvalidUrl(format!("缺少主机名: {}", raw)));
    }

    Ok(trimmed.to_string())
}
