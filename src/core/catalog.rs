//! 数据表目录解析模块
//!
//! 负责枚举数据库中的全部数据表，读取列名，并按表名前缀识别表类型和年份。
//! 读不到列名的表直接跳过，不影响其他表。

use crate::core::models::{TableKind, NULL_YEAR_SENTINEL};
use crate::core::synonyms::ColumnSet;
use crate::storage::{StoreError, TableStore, JOURNAL_COLUMN};

/// 表名前缀，按匹配优先级排列
///
/// `JCR` 放在最后，保证 `FQBJCR` 等更具体的前缀先被识别。
const TABLE_PREFIXES: &[(&str, TableKind)] = &[
    ("FQBJCR", TableKind::Partition),
    ("GJQKYJMD", TableKind::WarningList),
    ("CCF", TableKind::Ccf),
    ("JCR", TableKind::ImpactFactor),
];

/// 按表名识别表类型和年份
///
/// 去掉前缀后的剩余部分即为年份，不做数字校验；剩余部分为空时年份为 `None`。
pub fn classify(table_name: &str) -> (TableKind, Option<String>) {
    for (prefix, kind) in TABLE_PREFIXES {
        if let Some(rest) = table_name.strip_prefix(prefix) {
            let year = (!rest.is_empty()).then(|| rest.to_string());
            return (*kind, year);
        }
    }
    (TableKind::Unrecognized, None)
}

/// 已识别的数据表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    /// 表名
    pub name: String,
    /// 表类型
    pub kind: TableKind,
    /// 年份
    pub year: Option<String>,
    /// 列名
    pub columns: Vec<String>,
}

impl TableInfo {
    /// 是否参与期刊检索：类型已识别且包含 `Journal` 列
    pub fn is_searchable(&self) -> bool {
        self.kind.is_recognized() && self.has_journal_column()
    }

    /// 是否包含 `Journal` 列
    pub fn has_journal_column(&self) -> bool {
        self.columns.as_slice().has_column(JOURNAL_COLUMN)
    }

    /// 排序用年份
    pub fn year_key(&self) -> &str {
        self.year.as_deref().unwrap_or(NULL_YEAR_SENTINEL)
    }
}

/// 数据表目录
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    tables: Vec<TableInfo>,
}

impl SchemaCatalog {
    /// 从存储中解析全部已识别的数据表
    ///
    /// 无法枚举数据表时返回错误；单张表读取列名失败时跳过该表。
    pub fn resolve<S: TableStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let mut tables = Vec::new();

        for name in store.list_tables()? {
            let (kind, year) = classify(&name);
            if !kind.is_recognized() {
                continue;
            }

            match store.columns(&name) {
                Ok(columns) => tables.push(TableInfo {
                    name,
                    kind,
                    year,
                    columns,
                }),
                Err(e) => {
                    tracing::warn!("跳过数据表 {}: {}", name, e);
                }
            }
        }

        tracing::debug!("识别到 {} 张期刊数据表", tables.len());
        Ok(Self { tables })
    }

    /// 全部已识别的数据表（存储的自然顺序）
    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }

    /// 可参与检索的数据表
    pub fn searchable(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.iter().filter(|t| t.is_searchable())
    }

    /// 指定类型的数据表，按年份从新到旧排列（无年份的排在最后）
    pub fn of_kind_latest_first(&self, kind: TableKind) -> Vec<&TableInfo> {
        let mut tables: Vec<&TableInfo> = self.tables.iter().filter(|t| t.kind == kind).collect();
        tables.sort_by(|a, b| b.year_key().cmp(a.year_key()));
        tables
    }
}
