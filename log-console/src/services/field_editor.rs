//! 自定义字段编辑器
//!
//! 管理有序的键值草稿序列,提交时转换为日志字段映射。
//! 按位置的操作与按ID的操作都不会改变其余草稿的相对顺序。

use serde_json::{Number, Value};

use crate::models::{DraftId, FieldDraft, Fields};

/// 整数精度上限 (2^53),超出则保留为浮点
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 字段编辑器
#[derive(Debug, Default)]
pub struct FieldEditor {
    drafts: Vec<FieldDraft>,
    next_id: u64,
}

impl FieldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在末尾追加一个空草稿,返回其ID
    pub fn add_field(&mut self) -> DraftId {
        self.next_id += 1;
        let id = DraftId(self.next_id);
        self.drafts.push(FieldDraft::empty(id));
        id
    }

    /// 替换指定位置的草稿内容
    ///
    /// 位置越界时静默忽略: UI事件可能与删除操作竞争。
    pub fn update_field(&mut self, position: usize, key: &str, value: &str) -> bool {
        match self.drafts.get_mut(position) {
            Some(draft) => {
                draft.key = key.to_string();
                draft.value = value.to_string();
                true
            }
            None => {
                tracing::debug!(position, len = self.drafts.len(), "Ignoring update of missing draft");
                false
            }
        }
    }

    /// 按ID替换草稿内容,ID不存在时静默忽略
    pub fn update_by_id(&mut self, id: DraftId, key: &str, value: &str) -> bool {
        match self.position_of(id) {
            Some(position) => self.update_field(position, key, value),
            None => false,
        }
    }

    /// 删除指定位置的草稿,后续草稿前移一位
    pub fn remove_field(&mut self, position: usize) -> Option<FieldDraft> {
        if position < self.drafts.len() {
            Some(self.drafts.remove(position))
        } else {
            None
        }
    }

    /// 按ID删除草稿
    pub fn remove_by_id(&mut self, id: DraftId) -> Option<FieldDraft> {
        self.position_of(id).and_then(|p| self.remove_field(p))
    }

    pub fn drafts(&self) -> &[FieldDraft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// 清空草稿; ID计数不回退,旧ID不会被复用
    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    fn position_of(&self, id: DraftId) -> Option<usize> {
        self.drafts.iter().position(|d| d.id == id)
    }

    /// 生成提交用的字段映射
    ///
    /// - 键或值为空的草稿被丢弃
    /// - 值整体可解析为数字时转换为数字,否则保留字符串
    /// - 重复的键以最后一次写入为准
    pub fn to_field_map(&self) -> Fields {
        let mut fields = Fields::new();
        for draft in self.drafts.iter().filter(|d| d.is_complete()) {
            fields.insert(draft.key.clone(), coerce_value(&draft.value));
        }
        fields
    }
}

/// 值类型转换: `"42"` → 42, `"4.5"` → 4.5, `"42abc"` → `"42abc"`
///
/// 首尾空白不影响判断; `inf`/`NaN` 等非有限值保留为字符串。
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(raw.to_string());
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }

    if is_decimal_literal(trimmed) {
        if let Ok(float) = trimmed.parse::<f64>() {
            if float.is_finite() {
                if float.fract() == 0.0 && float.abs() < MAX_SAFE_INTEGER {
                    return Value::from(float as i64);
                }
                if let Some(number) = Number::from_f64(float) {
                    return Value::Number(number);
                }
            }
        }
    }

    Value::String(raw.to_string())
}

/// 只允许十进制/指数写法的字符,排除 `inf`、`nan` 之类的特殊拼写
fn is_decimal_literal(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}
