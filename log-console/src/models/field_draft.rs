//! 自定义字段草稿
//!
//! 编辑器中尚未校验的键值对,仅存在于一次编辑会话内。

use serde::{Deserialize, Serialize};

/// 草稿标识,创建时单调递增分配,删除其他草稿不会改变它
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DraftId(pub u64);

/// 字段草稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDraft {
    pub id: DraftId,
    pub key: String,
    pub value: String,
}

impl FieldDraft {
    /// 创建空草稿
    pub fn empty(id: DraftId) -> Self {
        Self {
            id,
            key: String::new(),
            value: String::new(),
        }
    }

    /// 键或值为空的草稿在提交时被静默丢弃
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}
