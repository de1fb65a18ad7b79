//! 期刊查询服务
//!
//! 对外暴露的全部入口。每个入口都返回字符串：成功时是排版好的报告，
//! 失败时是描述性的错误信息，任何底层错误都不会向调用方抛出。

use crate::core::aggregate::{
    group_by_journal, parse_journal_list, partition_trend, summarize_for_comparison,
};
use crate::core::catalog::SchemaCatalog;
use crate::core::report::{
    render_comparison, render_database_info, render_search_report, render_trend,
    render_warning_lists, TableSummary,
};
use crate::core::search::{JournalSearch, SearchOptions};
use crate::storage::{StoreError, TableStore};
use thiserror::Error;

/// 查询错误
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// 用户输入不合法，消息直接展示给用户
    #[error("{0}")]
    InvalidInput(String),
}

type LookupResult = Result<String, LookupError>;

/// 期刊查询服务
///
/// 持有一个已打开的存储句柄，由调用方负责创建和释放。
pub struct JournalService<S: TableStore> {
    store: S,
    options: SearchOptions,
}

impl<S: TableStore> JournalService<S> {
    /// 创建服务
    pub fn new(store: S, options: SearchOptions) -> Self {
        Self { store, options }
    }

    fn engine(&self) -> JournalSearch<'_, S> {
        JournalSearch::new(&self.store, self.options)
    }

    /// 搜索期刊信息，包括影响因子、分区、预警状态等
    pub fn search_journal(&self, journal_name: &str, year: Option<&str>) -> String {
        respond("查询出错", self.try_search_journal(journal_name, year))
    }

    fn try_search_journal(&self, journal_name: &str, year: Option<&str>) -> LookupResult {
        let name = require_name(journal_name)?;
        let results = self.engine().search(name, year)?;

        if results.is_empty() {
            return Ok(not_found(name));
        }
        Ok(render_search_report(&group_by_journal(&results)))
    }

    /// 获取期刊分区变化趋势
    pub fn get_partition_trends(&self, journal_name: &str) -> String {
        respond("分析出错", self.try_partition_trends(journal_name))
    }

    fn try_partition_trends(&self, journal_name: &str) -> LookupResult {
        let name = require_name(journal_name)?;
        let results = self.engine().search(name, None)?;

        if results.is_empty() {
            return Ok(not_found(name));
        }
        match partition_trend(&results) {
            Some(trend) => Ok(render_trend(&trend)),
            None => Ok(format!("未找到期刊 '{}' 的分区信息", name)),
        }
    }

    /// 查询国际期刊预警名单，可按关键词筛选
    pub fn check_warning_journals(&self, keywords: Option<&str>) -> String {
        respond("查询预警期刊出错", self.try_warning_journals(keywords))
    }

    fn try_warning_journals(&self, keywords: Option<&str>) -> LookupResult {
        let keyword = keywords.map(str::trim).filter(|k| !k.is_empty());
        let sections = self.engine().scan_warning_lists(keyword)?;

        if sections.is_empty() {
            return Ok("未找到预警期刊数据表".to_string());
        }
        Ok(render_warning_lists(&sections, keyword))
    }

    /// 比较多个期刊（逗号分隔，至少两个）
    pub fn compare_journals(&self, journal_list: &str) -> String {
        respond("比较分析出错", self.try_compare_journals(journal_list))
    }

    fn try_compare_journals(&self, journal_list: &str) -> LookupResult {
        let journals = parse_journal_list(journal_list);
        if journals.len() < 2 {
            return Err(LookupError::InvalidInput(
                "请至少提供2个期刊名称进行比较".to_string(),
            ));
        }

        let engine = self.engine();
        let mut rows = Vec::with_capacity(journals.len());
        for journal in &journals {
            let results = engine.search(journal, None)?;
            rows.push(summarize_for_comparison(journal, &results));
        }

        Ok(render_comparison(&rows))
    }

    /// 数据库基本信息：路径、表数量、每张表的记录数
    pub fn get_database_info(&self) -> String {
        respond("获取数据库信息出错", self.try_database_info())
    }

    fn try_database_info(&self) -> LookupResult {
        let mut names = self.store.list_tables()?;
        names.sort();

        let catalog = SchemaCatalog::resolve(&self.store)?;
        let tables: Vec<TableSummary> = names
            .into_iter()
            .map(|name| {
                let row_count = match self.store.row_count(&name) {
                    Ok(n) => Some(n),
                    Err(e) => {
                        tracing::warn!("无法统计数据表 {}: {}", name, e);
                        None
                    }
                };
                let info = catalog.tables().iter().find(|t| t.name == name).cloned();
                TableSummary {
                    name,
                    row_count,
                    info,
                }
            })
            .collect();

        Ok(render_database_info(
            &self.store.location().display().to_string(),
            &tables,
        ))
    }

    /// 健康检查
    pub fn health_check(&self) -> String {
        match self.store.ping() {
            Ok(()) => "OK".to_string(),
            Err(e) => format!("ERROR: {}", e),
        }
    }

    /// 期刊分析提示词模板
    pub fn journal_analysis_prompt(&self, journal_name: &str) -> String {
        journal_analysis_prompt(journal_name)
    }
}

/// 期刊分析提示词模板，不读取数据库
pub fn journal_analysis_prompt(journal_name: &str) -> String {
    format!(
        r#"
你是一个专业的学术期刊分析专家。请基于提供的期刊数据，对期刊 {} 进行全面分析，包括：

1. 期刊基本信息分析
2. 影响因子变化趋势
3. 分区变化情况
4. 预警状态评估
5. 投稿建议

请用专业、客观的语言进行分析，并给出具体的投稿建议。
"#,
        journal_name.trim()
    )
}

/// 把内部结果转换为对外的字符串
fn respond(context: &str, result: LookupResult) -> String {
    match result {
        Ok(text) => text,
        Err(LookupError::InvalidInput(message)) => message,
        Err(LookupError::Store(e)) => {
            tracing::error!("{}: {}", context, e);
            format!("{}: {}", context, e)
        }
    }
}

fn require_name(journal_name: &str) -> Result<&str, LookupError> {
    let name = journal_name.trim();
    if name.is_empty() {
        return Err(LookupError::InvalidInput("请提供期刊名称".to_string()));
    }
    Ok(name)
}

fn not_found(name: &str) -> String {
    format!("未找到期刊 '{}' 的相关信息", name)
}
