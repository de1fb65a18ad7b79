//! 列名同义词映射模块
//!
//! 各年份的数据表表头中英文混用且不统一，这里用静态配置表集中描述
//! "哪个表类型的哪个规范字段，可以从哪些列名读取"。
//! 新增一种表头写法只需要在对应列表里加一项。

use crate::core::models::{CanonicalField, TableKind};
use crate::storage::RawRow;

/// 某个规范字段的候选列名，按优先级排列
pub type SynonymList = &'static [&'static str];

/// 某个表类型的全部同义词配置
pub type SynonymSet = &'static [(CanonicalField, SynonymList)];

const IMPACT_FACTOR_SYNONYMS: SynonymSet = &[
    (CanonicalField::ImpactFactor, &["IF", "Impact Factor"]),
    (CanonicalField::Partition, &["Quartile", "分区"]),
    (CanonicalField::Category, &["Category", "类别"]),
];

const PARTITION_SYNONYMS: SynonymSet = &[
    (CanonicalField::Partition, &["大类分区", "Partition"]),
    (CanonicalField::Category, &["学科", "Subject"]),
];

const WARNING_LIST_SYNONYMS: SynonymSet = &[(
    CanonicalField::WarningStatus,
    &["预警原因", "预警等级", "Warning Level"],
)];

const CCF_SYNONYMS: SynonymSet = &[
    (CanonicalField::CcfLevel, &["CCF推荐类型", "CCF Level"]),
    (CanonicalField::Category, &["领域", "Field"]),
];

/// 表类型对应的同义词配置
pub fn synonym_set(kind: TableKind) -> SynonymSet {
    match kind {
        TableKind::ImpactFactor => IMPACT_FACTOR_SYNONYMS,
        TableKind::Partition => PARTITION_SYNONYMS,
        TableKind::WarningList => WARNING_LIST_SYNONYMS,
        TableKind::Ccf => CCF_SYNONYMS,
        TableKind::Unrecognized => &[],
    }
}

/// 表类型下某个规范字段的候选列名
pub fn synonyms(kind: TableKind, field: CanonicalField) -> SynonymList {
    synonym_set(kind)
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, list)| *list)
        .unwrap_or(&[])
}

/// 可以判断"是否包含某列"的集合
pub trait ColumnSet {
    fn has_column(&self, name: &str) -> bool;
}

impl ColumnSet for RawRow {
    fn has_column(&self, name: &str) -> bool {
        RawRow::has_column(self, name)
    }
}

impl ColumnSet for [String] {
    fn has_column(&self, name: &str) -> bool {
        self.iter().any(|c| c == name)
    }
}

/// 解析规范字段实际对应的列名：候选列表中第一个存在的列
pub fn resolve_field<C>(columns: &C, kind: TableKind, field: CanonicalField) -> Option<&'static str>
where
    C: ColumnSet + ?Sized,
{
    synonyms(kind, field)
        .iter()
        .copied()
        .find(|candidate| columns.has_column(candidate))
}
