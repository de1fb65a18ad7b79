//! 期刊检索模块
//!
//! 在所有已识别且含 `Journal` 列的数据表中做不区分大小写的子串匹配，
//! 匹配行经规范化后汇总为 [`SearchResultSet`]。
//!
//! 匹配使用 SQL `LIKE`，模式中的 `%` 和 `_` 会被当作通配符，不做转义。

use crate::core::catalog::{SchemaCatalog, TableInfo};
use crate::core::models::{JournalRecord, SearchResultSet, TableKind};
use crate::core::normalizer::normalize;
use crate::storage::{RowFilter, StoreError, TableStore, JOURNAL_COLUMN};

/// 检索选项
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// 是否按年份参数过滤结果（默认不过滤，年份参数只被接受）
    pub apply_year_filter: bool,
}

/// 一张预警名单表的检索结果
#[derive(Debug, Clone, PartialEq)]
pub struct WarningListSection {
    /// 表名
    pub table: String,
    /// 年份
    pub year: Option<String>,
    /// 名单中的期刊
    pub entries: Vec<JournalRecord>,
}

/// 期刊检索引擎
pub struct JournalSearch<'a, S: TableStore + ?Sized> {
    store: &'a S,
    options: SearchOptions,
}

impl<'a, S: TableStore + ?Sized> JournalSearch<'a, S> {
    /// 创建检索引擎
    pub fn new(store: &'a S, options: SearchOptions) -> Self {
        Self { store, options }
    }

    /// 检索期刊
    ///
    /// 空模式会匹配全部记录。单张表查询失败时跳过该表。
    pub fn search(&self, pattern: &str, year: Option<&str>) -> Result<SearchResultSet, StoreError> {
        let catalog = SchemaCatalog::resolve(self.store)?;
        let filter = RowFilter::JournalContains(pattern.to_string());

        let year_filter = if self.options.apply_year_filter {
            year.map(str::trim).filter(|y| !y.is_empty())
        } else {
            if let Some(y) = year {
                tracing::debug!("年份参数 {} 未启用过滤，返回全部年份", y);
            }
            None
        };

        let mut results = Vec::new();
        for table in catalog.searchable() {
            if let Some(wanted) = year_filter {
                if table.year.as_deref() != Some(wanted) {
                    continue;
                }
            }
            results.extend(self.query_table(table, Some(&filter)).unwrap_or_default());
        }

        tracing::info!("检索 '{}' 共得到 {} 条记录", pattern, results.len());
        Ok(results)
    }

    /// 扫描预警名单表，按年份从新到旧
    ///
    /// 每张表都会返回一个分组，即使过滤后没有任何期刊。
    pub fn scan_warning_lists(
        &self,
        keyword: Option<&str>,
    ) -> Result<Vec<WarningListSection>, StoreError> {
        let catalog = SchemaCatalog::resolve(self.store)?;
        let filter = keyword.map(|k| RowFilter::JournalContains(k.to_string()));

        let mut sections = Vec::new();
        for table in catalog.of_kind_latest_first(TableKind::WarningList) {
            // 没有 Journal 列的表读不出期刊名，不发起查询
            let entries = if table.has_journal_column() {
                match self.query_table(table, filter.as_ref()) {
                    Some(entries) => entries,
                    None => continue,
                }
            } else {
                tracing::warn!("预警名单表 {} 缺少 {} 列", table.name, JOURNAL_COLUMN);
                Vec::new()
            };

            sections.push(WarningListSection {
                table: table.name.clone(),
                year: table.year.clone(),
                entries,
            });
        }

        Ok(sections)
    }

    /// 查询单张表并规范化，查询失败时返回 `None`
    fn query_table(
        &self,
        table: &TableInfo,
        filter: Option<&RowFilter>,
    ) -> Option<Vec<JournalRecord>> {
        match self.store.query(&table.name, filter) {
            Ok(rows) => Some(
                rows.iter()
                    .filter_map(|row| normalize(row, table.kind, table.year.as_deref()))
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!("跳过数据表 {}: {}", table.name, e);
                None
            }
        }
    }
}
