//! 核心数据模型定义
//!
//! 所有记录都是单次请求内临时构造的，不做持久化。

use std::fmt;

/// 年份为空时的排序占位值，保证未知年份排在最后
pub const NULL_YEAR_SENTINEL: &str = "0000";

/// 数据表类型
/// 仅由表名前缀决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// JCR 影响因子表（JCR2024）
    ImpactFactor,
    /// 中科院分区表（FQBJCR2023）
    Partition,
    /// 国际期刊预警名单（GJQKYJMD2022）
    WarningList,
    /// CCF 推荐目录（CCF2021）
    Ccf,
    /// 无法识别，不参与检索
    Unrecognized,
}

impl TableKind {
    /// 是否参与检索
    pub fn is_recognized(&self) -> bool {
        !matches!(self, TableKind::Unrecognized)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::ImpactFactor => write!(f, "JCR影响因子"),
            TableKind::Partition => write!(f, "中科院分区"),
            TableKind::WarningList => write!(f, "预警名单"),
            TableKind::Ccf => write!(f, "CCF推荐"),
            TableKind::Unrecognized => write!(f, "未识别"),
        }
    }
}

/// 规范字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    ImpactFactor,
    Partition,
    Category,
    WarningStatus,
    CcfLevel,
}

/// 期刊记录 - 核心数据结构
/// 由一行原始数据规范化而来，只填充来源表类型适用的字段
#[derive(Debug, Clone, PartialEq)]
pub struct JournalRecord {
    /// 期刊名称（非空）
    pub journal_name: String,
    /// 影响因子
    pub impact_factor: Option<f64>,
    /// 分区 / 四分位
    pub partition: Option<String>,
    /// 学科类别
    pub category: Option<String>,
    /// 预警状态
    pub warning_status: Option<String>,
    /// CCF 推荐等级
    pub ccf_level: Option<String>,
    /// 年份（来自表名，可能不是数字）
    pub year: Option<String>,
}

impl JournalRecord {
    /// 创建只有期刊名和年份的记录
    pub fn new(journal_name: impl Into<String>, year: Option<String>) -> Self {
        Self {
            journal_name: journal_name.into(),
            impact_factor: None,
            partition: None,
            category: None,
            warning_status: None,
            ccf_level: None,
            year,
        }
    }

    /// 排序用年份
    pub fn year_key(&self) -> &str {
        self.year.as_deref().unwrap_or(NULL_YEAR_SENTINEL)
    }
}

/// 一次检索的结果，不做跨表去重
pub type SearchResultSet = Vec<JournalRecord>;

/// 分区字符串是否提到第 `tier` 区（"1区" 或 "Q1" 形式）
pub fn mentions_tier(partition: &str, tier: u8) -> bool {
    partition.contains(&format!("{}区", tier)) || partition.contains(&format!("Q{}", tier))
}

/// 分区趋势结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendVerdict {
    /// 保持在顶级分区
    TopTier,
    /// 分区较低，需谨慎
    LowTier,
    /// 稳定，中等水平
    MidTier,
}

impl TrendVerdict {
    /// 根据最新分区判断
    pub fn from_latest(partition: &str) -> Self {
        if mentions_tier(partition, 1) {
            TrendVerdict::TopTier
        } else if mentions_tier(partition, 4) {
            TrendVerdict::LowTier
        } else {
            TrendVerdict::MidTier
        }
    }
}

/// 投稿建议
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// 在预警名单中，不建议投稿
    NotRecommended,
    /// 顶级期刊，强烈推荐
    StronglyRecommended,
    /// 优质期刊，推荐投稿
    Recommended,
    /// 可考虑投稿
    Consider,
}

impl Recommendation {
    /// 预警优先于分区
    pub fn decide(warned: bool, partition: Option<&str>) -> Self {
        if warned {
            return Recommendation::NotRecommended;
        }
        match partition {
            Some(p) if mentions_tier(p, 1) => Recommendation::StronglyRecommended,
            Some(p) if mentions_tier(p, 2) => Recommendation::Recommended,
            _ => Recommendation::Consider,
        }
    }
}
