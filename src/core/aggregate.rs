//! 结果汇总模块
//!
//! 对检索结果做纯函数式的整理：按期刊分组、分区趋势、对比摘要。
//! 这里不访问数据库，也不负责文字排版。

use crate::core::models::{JournalRecord, Recommendation, TrendVerdict};

/// 同一期刊的全部记录，按年份从新到旧
#[derive(Debug, Clone, PartialEq)]
pub struct JournalGroup {
    pub journal_name: String,
    pub records: Vec<JournalRecord>,
}

/// 按期刊名分组
///
/// 分组顺序为期刊第一次出现的顺序；组内按年份降序，无年份的排在最后。
pub fn group_by_journal(records: &[JournalRecord]) -> Vec<JournalGroup> {
    let mut groups: Vec<JournalGroup> = Vec::new();

    for record in records {
        match groups
            .iter_mut()
            .find(|g| g.journal_name == record.journal_name)
        {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(JournalGroup {
                journal_name: record.journal_name.clone(),
                records: vec![record.clone()],
            }),
        }
    }

    for group in &mut groups {
        sort_latest_first(&mut group.records);
    }
    groups
}

/// 按年份降序稳定排序
fn sort_latest_first(records: &mut [JournalRecord]) {
    records.sort_by(|a, b| b.year_key().cmp(a.year_key()));
}

/// 分区趋势中的一个点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub year: String,
    pub partition: String,
    pub journal_name: String,
}

/// 分区趋势
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTrend {
    /// 按年份升序
    pub points: Vec<TrendPoint>,
    /// 至少两个点时才给出结论
    pub verdict: Option<TrendVerdict>,
}

impl PartitionTrend {
    /// 是否涉及多个期刊（模糊匹配时可能出现）
    pub fn spans_multiple_journals(&self) -> bool {
        self.points
            .iter()
            .any(|p| p.journal_name != self.points[0].journal_name)
    }
}

/// 提取分区趋势
///
/// 只保留同时有分区和年份的记录；没有这样的记录时返回 `None`。
pub fn partition_trend(records: &[JournalRecord]) -> Option<PartitionTrend> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .filter_map(|r| {
            Some(TrendPoint {
                year: r.year.clone()?,
                partition: r.partition.clone()?,
                journal_name: r.journal_name.clone(),
            })
        })
        .collect();

    if points.is_empty() {
        return None;
    }

    points.sort_by(|a, b| a.year.cmp(&b.year));

    let verdict = if points.len() > 1 {
        points
            .last()
            .map(|latest| TrendVerdict::from_latest(&latest.partition))
    } else {
        None
    };

    Some(PartitionTrend { points, verdict })
}

/// 对比表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// 用户输入的期刊名
    pub journal: String,
    /// 是否检索到任何记录
    pub has_data: bool,
    pub latest_impact_factor: Option<f64>,
    pub latest_partition: Option<String>,
    pub warned: bool,
    /// 无数据时为 `None`
    pub recommendation: Option<Recommendation>,
}

/// 汇总单个期刊的对比信息
///
/// 记录先按年份降序稳定排序，影响因子和分区各自取第一个非空值；
/// 任意一条记录带预警即视为预警。
pub fn summarize_for_comparison(journal: &str, records: &[JournalRecord]) -> ComparisonRow {
    if records.is_empty() {
        return ComparisonRow {
            journal: journal.to_string(),
            has_data: false,
            latest_impact_factor: None,
            latest_partition: None,
            warned: false,
            recommendation: None,
        };
    }

    let mut ordered = records.to_vec();
    sort_latest_first(&mut ordered);

    let latest_impact_factor = ordered.iter().find_map(|r| r.impact_factor);
    let latest_partition = ordered.iter().find_map(|r| r.partition.clone());
    let warned = ordered.iter().any(|r| r.warning_status.is_some());

    ComparisonRow {
        journal: journal.to_string(),
        has_data: true,
        recommendation: Some(Recommendation::decide(warned, latest_partition.as_deref())),
        latest_impact_factor,
        latest_partition,
        warned,
    }
}

/// 解析逗号分隔的期刊列表，去掉空白项
pub fn parse_journal_list(journal_list: &str) -> Vec<String> {
    journal_list
        .split(',')
        .map(str::trim)
        .filter(|j| !j.is_empty())
        .map(str::to_string)
        .collect()
}
