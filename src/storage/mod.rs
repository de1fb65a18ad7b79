//! 存储模块
//!
//! 核心逻辑只通过 [`TableStore`] 读取数据表，不关心底层是哪种数据库。
//! 数据表由外部导入流程写入，这里只读。

pub mod config;
pub mod database;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 所有数据表共用的期刊名称列
pub const JOURNAL_COLUMN: &str = "Journal";

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 数据库无法打开或无法枚举数据表
    #[error("数据库不可用 ({path}): {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    /// 数据目录无法创建
    #[error("无法创建数据目录 {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 单张数据表读取失败
    #[error("数据表 {table} 读取失败: {source}")]
    TableAccess {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// 行过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// `Journal` 列包含子串（不区分大小写，不转义通配符）
    JournalContains(String),
}

/// 一行原始数据：列名 -> 文本值
///
/// 列存在但值为 NULL 时仍视为"存在该列"。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, Option<String>>,
}

impl RawRow {
    /// 创建空行
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入单元格
    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.cells.insert(column.into(), value);
    }

    /// 是否包含指定列
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// 读取非空文本值
    pub fn text(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| v.as_deref())
    }

    /// 列名迭代
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }
}

/// 只读数据表存储
pub trait TableStore {
    /// 存储位置（用于展示）
    fn location(&self) -> &Path;

    /// 按存储自然顺序列出所有数据表
    fn list_tables(&self) -> Result<Vec<String>, StoreError>;

    /// 读取数据表的列名
    fn columns(&self, table: &str) -> Result<Vec<String>, StoreError>;

    /// 查询数据表，可选过滤
    fn query(&self, table: &str, filter: Option<&RowFilter>) -> Result<Vec<RawRow>, StoreError>;

    /// 数据表行数
    fn row_count(&self, table: &str) -> Result<u64, StoreError>;

    /// 检查存储是否可访问
    fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cell_still_counts_as_column() {
        let row: RawRow = [("Journal", Some("Nature")), ("IF", None)].into_iter().collect();

        assert!(row.has_column("IF"));
        assert_eq!(row.text("IF"), None);
        assert_eq!(row.text("Journal"), Some("Nature"));
        assert!(!row.has_column("Quartile"));
    }
}
