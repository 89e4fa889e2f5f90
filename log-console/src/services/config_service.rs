use std::env;
use std::path::PathBuf;

use crate::models::console_config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::models::{ConfigError, ConsoleConfig};

/// 后端地址
pub const ENV_API_URL: &str = "LOG_CONSOLE_API_URL";
/// 兼容前端工程使用的变量名
pub const ENV_API_URL_FALLBACK: &str = "NEXT_PUBLIC_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "LOG_CONSOLE_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "LOG_CONSOLE_LOG_DIR";

/// 命令行覆盖项,优先级高于环境变量
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

/// 配置服务
///
/// 启动时加载一次配置:
/// - 当前目录存在 .env 时先载入环境
/// - 读取环境变量
/// - 应用命令行覆盖项
pub struct ConfigService;

impl ConfigService {
    /// 从进程环境加载配置
    pub fn load(overrides: ConfigOverrides) -> Result<ConsoleConfig, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::IoError(format!("无法读取 .env: {}", e))),
        }

        Self::load_from(|key| env::var(key).ok(), overrides)
    }

    /// 从任意变量来源加载配置
    ///
    /// # 错误处理
    /// - 地址格式错误时返回 InvalidUrl
    /// - 超时不是正整数时返回 InvalidValue
    pub fn load_from<F>(lookup: F, overrides: ConfigOverrides) -> Result<ConsoleConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = overrides
            .api_url
            .filter(|v| !v.trim().is_empty())
            .or_else(|| non_empty(ENV_API_URL))
            .or_else(|| non_empty(ENV_API_URL_FALLBACK))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match non_empty(ENV_TIMEOUT_SECS) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS.to_string(),
                value: "0".to_string(),
            });
        }

        let mut config = ConsoleConfig::new(&api_url)?.with_timeout(timeout_secs);
        if let Some(dir) = overrides.log_dir.or_else(|| non_empty(ENV_LOG_DIR).map(PathBuf::from)) {
            config = config.with_log_dir(dir);
        }

        tracing::info!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.request_timeout_secs,
            "Console configuration loaded"
        );

        Ok(config)
    }
}
