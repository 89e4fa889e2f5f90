//! 日志记录模型
//!
//! 定义后端返回的日志条目与客户端提交的日志请求。
//! `LogEntry` 为只读快照,每次刷新整体替换; `LogRequest` 由编辑器构造。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// 日志附加字段 (保持插入顺序,便于确定性展示)
pub type Fields = Map<String, Value>;

/// 日志级别
///
/// 固定词汇 info/warn/error/debug,未知取值保存在 `Other` 中而不是报错。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Warn,
    Error,
    Debug,
    Other(String),
}

impl LogLevel {
    /// 已知级别,按界面下拉框顺序
    pub const KNOWN: [LogLevel; 4] = [
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Debug,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Debug => "debug",
            Self::Other(raw) => raw,
        }
    }

    /// 是否属于固定词汇
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// 从后端原始字符串构造,区分大小写 (后端约定小写)
    fn from_wire(raw: &str) -> Self {
        match raw {
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            "debug" => Self::Debug,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 用户输入解析: 忽略大小写, `warning` 视为 `warn`,只接受已知级别
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "debug" => Ok(Self::Debug),
            other => Err(format!(
                "未知的日志级别: {} (可选: info, warn, error, debug)",
                other
            )),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// 级别过滤条件
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(LogLevel),
}

impl LevelFilter {
    /// 纯过滤谓词
    pub fn matches(&self, level: &LogLevel) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == level,
        }
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<LogLevel>().map(Self::Only)
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(level) => write!(f, "{}", level),
        }
    }
}

/// 日志条目的稳定标识
///
/// 内容指纹加上同一指纹在集合中的出现序号,过滤或重排都不会改变它。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    pub fingerprint: u64,
    pub occurrence: u32,
}

impl EntryId {
    /// 为整个集合分配标识,完全相同的条目按出现顺序区分
    pub fn assign(entries: &[LogEntry]) -> Vec<EntryId> {
        let mut seen: HashMap<u64, u32> = HashMap::new();
        entries
            .iter()
            .map(|entry| {
                let fingerprint = entry.fingerprint();
                let occurrence = seen.entry(fingerprint).or_insert(0);
                let id = EntryId {
                    fingerprint,
                    occurrence: *occurrence,
                };
                *occurrence += 1;
                id
            })
            .collect()
    }
}

/// 后端返回的日志条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO-8601 时间戳
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// 产生日志的服务标识
    pub service: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Fields,
}

/// 后端可能返回 `"fields": null`,按空映射处理
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Fields, D::Error> {
    Ok(Option::<Fields>::deserialize(deserializer)?.unwrap_or_default())
}

impl LogEntry {
    /// 内容指纹: timestamp + service + message + level + fields
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.timestamp.hash(&mut hasher);
        self.service.hash(&mut hasher);
        self.message.hash(&mut hasher);
        self.level.hash(&mut hasher);
        // Map 的序列化是确定的 (保持插入顺序)
        Value::Object(self.fields.clone()).to_string().hash(&mut hasher);
        hasher.finish()
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// 客户端提交的日志请求 (timestamp 与 service 由后端填充)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub message: String,
    pub level: LogLevel,
    pub fields: Fields,
}

/// `GET /logs` 响应体
#[derive(Debug, Clone, Deserialize)]
pub struct LogListResponse {
    pub logs: Vec<LogEntry>,
}

/// `POST /logs` 与 `GET /generate-logs` 的确认响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub message: String,
    pub timestamp: Option<String>,
}

/// `GET /` 健康检查响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}
