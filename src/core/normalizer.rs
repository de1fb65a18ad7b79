//! 记录规范化模块
//!
//! 把一行原始数据按来源表类型转换为 [`JournalRecord`]。
//! 历史数据里有残缺行是常态，任何异常形状的行都只是被丢弃，不会报错。

use crate::core::models::{CanonicalField, JournalRecord, TableKind};
use crate::core::synonyms::{resolve_field, synonym_set};
use crate::storage::{RawRow, JOURNAL_COLUMN};

/// 规范化一行数据
///
/// 期刊名缺失或为空白、表类型无法识别时返回 `None`。
pub fn normalize(row: &RawRow, kind: TableKind, year: Option<&str>) -> Option<JournalRecord> {
    if !kind.is_recognized() {
        return None;
    }

    let journal_name = non_blank(row.text(JOURNAL_COLUMN))?;
    let mut record = JournalRecord::new(journal_name, year.map(str::to_string));

    for (field, _) in synonym_set(kind) {
        let value = resolve_field(row, kind, *field).and_then(|column| non_blank(row.text(column)));
        let Some(value) = value else {
            continue;
        };

        match field {
            CanonicalField::ImpactFactor => record.impact_factor = parse_impact_factor(&value),
            CanonicalField::Partition => record.partition = Some(value),
            CanonicalField::Category => record.category = Some(value),
            CanonicalField::WarningStatus => record.warning_status = Some(value),
            CanonicalField::CcfLevel => record.ccf_level = Some(value),
        }
    }

    Some(record)
}

/// 去掉首尾空白，空串视为缺失
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 解析影响因子，无法解析的值（如 "N/A"）丢弃
fn parse_impact_factor(value: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::debug!("忽略无法解析的影响因子: {}", value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, Option<&str>)]) -> RawRow {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_normalize_impact_factor_row() {
        let r = row(&[
            ("Journal", Some("Nature")),
            ("IF", Some("50.5")),
            ("Quartile", Some("Q1")),
            ("Category", Some("MULTIDISCIPLINARY SCIENCES")),
        ]);

        let record = normalize(&r, TableKind::ImpactFactor, Some("2024")).unwrap();
        assert_eq!(record.journal_name, "Nature");
        assert_eq!(record.impact_factor, Some(50.5));
        assert_eq!(record.partition.as_deref(), Some("Q1"));
        assert_eq!(record.category.as_deref(), Some("MULTIDISCIPLINARY SCIENCES"));
        assert_eq!(record.warning_status, None);
        assert_eq!(record.ccf_level, None);
        assert_eq!(record.year.as_deref(), Some("2024"));
    }

    #[test]
    fn test_only_fields_of_kind_are_filled() {
        // 预警表里即使出现 IF 列也不读取
        let r = row(&[
            ("Journal", Some("Some Journal")),
            ("IF", Some("1.2")),
            ("预警等级", Some("高")),
        ]);

        let record = normalize(&r, TableKind::WarningList, Some("2023")).unwrap();
        assert_eq!(record.warning_status.as_deref(), Some("高"));
        assert_eq!(record.impact_factor, None);
    }

    #[test]
    fn test_missing_or_blank_journal_is_dropped() {
        let missing = row(&[("IF", Some("3.0"))]);
        assert!(normalize(&missing, TableKind::ImpactFactor, None).is_none());

        let blank = row(&[("Journal", Some("   ")), ("IF", Some("3.0"))]);
        assert!(normalize(&blank, TableKind::ImpactFactor, None).is_none());

        let null = row(&[("Journal", None)]);
        assert!(normalize(&null, TableKind::Ccf, None).is_none());
    }

    #[test]
    fn test_unrecognized_kind_is_dropped() {
        let r = row(&[("Journal", Some("Nature"))]);
        assert!(normalize(&r, TableKind::Unrecognized, None).is_none());
    }

    #[test]
    fn test_present_but_null_synonym_does_not_fall_through() {
        // 第一个存在的候选列胜出，即使它的值为空
        let r = row(&[
            ("Journal", Some("Cell")),
            ("IF", None),
            ("Impact Factor", Some("45.5")),
        ]);

        let record = normalize(&r, TableKind::ImpactFactor, None).unwrap();
        assert_eq!(record.impact_factor, None);
    }

    #[test]
    fn test_unparsable_impact_factor_is_dropped() {
        let r = row(&[
            ("Journal", Some("Cell")),
            ("IF", Some("N/A")),
            ("分区", Some("1区")),
        ]);

        let record = normalize(&r, TableKind::ImpactFactor, None).unwrap();
        assert_eq!(record.impact_factor, None);
        assert_eq!(record.partition.as_deref(), Some("1区"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let r = row(&[
            ("Journal", Some("  IEEE TPAMI ")),
            ("CCF推荐类型", Some(" A ")),
            ("Field", Some("人工智能")),
        ]);

        let record = normalize(&r, TableKind::Ccf, Some("2022")).unwrap();
        assert_eq!(record.journal_name, "IEEE TPAMI");
        assert_eq!(record.ccf_level.as_deref(), Some("A"));
        assert_eq!(record.category.as_deref(), Some("人工智能"));
    }
}
