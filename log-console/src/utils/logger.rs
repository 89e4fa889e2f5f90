use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 初始化日志系统
///
/// 配置结构化日志输出:
/// - JSON格式文件: 按天轮转,经 non_blocking 写入,避免阻塞网络操作
/// - 控制台层: 只输出 WARN 及以上到 stderr,不干扰交互界面
/// - 环境变量控制: RUST_LOG=debug 可调整文件日志级别
///
/// # 重要提示
/// 返回的guard必须被调用者保存,直到应用退出。
/// 如果guard被drop,日志写入器将被关闭。
///
/// # 示例日志
/// ```json
/// {
///   "timestamp": "2025-10-05T10:30:45.123Z",
///   "level": "INFO",
///   "target": "log_console::services::sync_controller",
///   "fields": {
///     "seq": 3,
///     "count": 10,
///     "message": "Logs refreshed"
///   }
/// }
/// ```
pub fn init(log_dir: &Path) -> Result<WorkerGuard, io::Error> {
    std::fs::create_dir_all(log_dir)?;

    // 文件命名格式: log-console.2025-10-05.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("log-console")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    let console_layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(guard)
}

/// 日志宏辅助模块
pub mod macros {
    /// 记录控制台操作事件
    ///
    /// 使用示例:
    /// ```no_run
    /// use log_console::log_event;
    /// log_event!("FilterChanged", filter = "error");
    /// ```
    #[macro_export]
    macro_rules! log_event {
        ($event_type:expr, $($field:tt = $value:expr),* $(,)?) => {
            tracing::info!(
                event_type = $event_type,
                $($field = $value),*
            );
        };
    }
}
