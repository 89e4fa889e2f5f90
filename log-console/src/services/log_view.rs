//! 日志过滤与展示
//!
//! 持有当前日志集合 (每次拉取整体替换) 以及两项界面状态:
//! - 级别过滤条件,每次读取时重新计算可见集合,不做缓存
//! - 展开条目,以稳定标识记录,过滤条件变化不会让其他条目"被展开"

use std::fmt::Write as _;

use crate::models::{EntryId, LevelFilter, LogEntry, LogLevel};
use crate::utils::format::{fields_block, format_timestamp, indent, level_badge};

/// 空列表提示
pub const EMPTY_MESSAGE: &str = "No logs to display.";

/// 加载中提示
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Default)]
pub struct LogView {
    entries: Vec<LogEntry>,
    ids: Vec<EntryId>,
    filter: LevelFilter,
    expanded: Option<EntryId>,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换日志集合
    ///
    /// 展开状态仅在对应条目仍然存在时保留。
    pub fn replace_entries(&mut self, entries: Vec<LogEntry>) {
        self.ids = EntryId::assign(&entries);
        self.entries = entries;

        if let Some(expanded) = self.expanded {
            if !self.ids.contains(&expanded) {
                self.expanded = None;
            }
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn filter(&self) -> &LevelFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: LevelFilter) {
        tracing::debug!(filter = %filter, "Level filter changed");
        self.filter = filter;
    }

    /// 当前过滤条件下可见的条目,保持原始顺序
    pub fn visible(&self) -> Vec<&LogEntry> {
        self.visible_with_ids().map(|(_, entry)| entry).collect()
    }

    fn visible_with_ids(&self) -> impl Iterator<Item = (EntryId, &LogEntry)> {
        self.ids
            .iter()
            .copied()
            .zip(self.entries.iter())
            .filter(move |(_, entry)| self.filter.matches(&entry.level))
    }

    /// 切换可见列表中第 `index` 项的展开状态
    ///
    /// 同一项切换两次回到收起; 切换另一项时展开转移到新项。
    /// 越界或没有附加字段的条目不做任何改变。返回该项当前是否展开。
    pub fn toggle_expand(&mut self, index: usize) -> bool {
        let Some((id, entry)) = self.visible_with_ids().nth(index) else {
            return false;
        };
        if !entry.has_fields() {
            return false;
        }

        if self.expanded == Some(id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(id);
            true
        }
    }

    /// 可见列表中第 `index` 项是否展开
    pub fn is_expanded(&self, index: usize) -> bool {
        match (self.expanded, self.visible_with_ids().nth(index)) {
            (Some(expanded), Some((id, _))) => expanded == id,
            _ => false,
        }
    }

    /// 当前展开的条目 (即使它被过滤隐藏)
    pub fn expanded_entry(&self) -> Option<&LogEntry> {
        let expanded = self.expanded?;
        self.ids
            .iter()
            .position(|id| *id == expanded)
            .map(|i| &self.entries[i])
    }

    /// 全量集合按级别计数: 已知级别固定顺序在前,未知级别按首次出现顺序
    pub fn level_counts(&self) -> Vec<(LogLevel, usize)> {
        let mut counts: Vec<(LogLevel, usize)> =
            LogLevel::KNOWN.iter().cloned().map(|l| (l, 0)).collect();

        for entry in &self.entries {
            match counts.iter_mut().find(|(level, _)| *level == entry.level) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.level.clone(), 1)),
            }
        }
        counts
    }

    /// 渲染日志列表文本
    ///
    /// 编号从1开始,与控制台命令中的编号一致。
    pub fn render(&self, loading: bool, error: Option<&str>) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Logs (filter: {}, {} of {})",
            self.filter,
            self.visible_with_ids().count(),
            self.entries.len()
        );

        if let Some(error) = error {
            let _ = writeln!(out, "! {}", error);
        }

        if loading {
            let _ = writeln!(out, "{}", LOADING_MESSAGE);
            return out;
        }

        let mut shown = 0;
        for (index, (id, entry)) in self.visible_with_ids().enumerate() {
            shown += 1;
            let _ = writeln!(
                out,
                "{:>3}. {} {}  {}",
                index + 1,
                level_badge(&entry.level),
                format_timestamp(&entry.timestamp),
                entry.service
            );
            let _ = writeln!(out, "     {}", entry.message);

            if entry.has_fields() {
                let expanded = self.expanded == Some(id);
                let marker = if expanded { "v" } else { ">" };
                let _ = writeln!(out, "     {} fields ({})", marker, entry.fields.len());
                if expanded {
                    let _ = writeln!(out, "{}", indent(&fields_block(&entry.fields), 7));
                }
            }
        }

        if shown == 0 {
            let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        }
        out
    }
}
