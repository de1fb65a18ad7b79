//! 报告排版模块
//!
//! 把汇总结果排版成给用户阅读的文本。

use crate::core::aggregate::{ComparisonRow, JournalGroup, PartitionTrend};
use crate::core::catalog::TableInfo;
use crate::core::models::{Recommendation, TrendVerdict};
use crate::core::search::WarningListSection;

const NO_DATA: &str = "无数据";

/// 影响因子至少保留一位小数（3.0 不显示成 3）
fn format_impact_factor(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// 期刊检索报告
pub fn render_search_report(groups: &[JournalGroup]) -> String {
    let mut out = Vec::new();

    for group in groups {
        out.push(format!("\n📚 期刊名称: {}", group.journal_name));
        out.push("=".repeat(50));

        for info in &group.records {
            match &info.year {
                Some(year) => out.push(format!("\n【{}年】", year)),
                None => out.push("\n【未知年份】".to_string()),
            }

            if let Some(impact_factor) = info.impact_factor {
                out.push(format!("  📊 影响因子: {}", format_impact_factor(impact_factor)));
            }
            if let Some(partition) = &info.partition {
                out.push(format!("  🏆 分区: {}", partition));
            }
            if let Some(category) = &info.category {
                out.push(format!("  📖 学科类别: {}", category));
            }
            if let Some(warning) = &info.warning_status {
                out.push(format!("  ⚠️ 预警状态: {}", warning));
            }
            if let Some(ccf_level) = &info.ccf_level {
                out.push(format!("  🏅 CCF推荐等级: {}", ccf_level));
            }
        }
    }

    out.join("\n")
}

/// 分区趋势报告
pub fn render_trend(trend: &PartitionTrend) -> String {
    let mut out = vec!["📈 期刊分区变化趋势分析".to_string(), "=".repeat(40)];
    let show_names = trend.spans_multiple_journals();

    for point in &trend.points {
        if show_names {
            out.push(format!(
                "{}年: {} ({})",
                point.year, point.partition, point.journal_name
            ));
        } else {
            out.push(format!("{}年: {}", point.year, point.partition));
        }
    }

    if let Some(verdict) = trend.verdict {
        out.push("\n📊 趋势分析:".to_string());
        out.push(
            match verdict {
                TrendVerdict::TopTier => "✅ 该期刊保持在顶级分区",
                TrendVerdict::LowTier => "⚠️ 该期刊分区较低，发表需谨慎",
                TrendVerdict::MidTier => "📊 该期刊分区稳定，属于中等水平",
            }
            .to_string(),
        );
    }

    out.join("\n")
}

/// 预警名单报告
pub fn render_warning_lists(sections: &[WarningListSection], keyword: Option<&str>) -> String {
    let mut out = vec!["🚨 国际期刊预警名单查询结果".to_string(), "=".repeat(40)];

    for section in sections {
        match &section.year {
            Some(year) => out.push(format!("\n📅 {}年预警名单:", year)),
            None => out.push("\n📅 未知年份预警名单:".to_string()),
        }

        if section.entries.is_empty() {
            match keyword {
                Some(k) => out.push(format!("  无匹配 '{}' 的预警期刊", k)),
                None => out.push("  该年度无预警期刊数据".to_string()),
            }
            continue;
        }

        for entry in &section.entries {
            out.push(format!(
                "  • {}: {}",
                entry.journal_name,
                entry.warning_status.as_deref().unwrap_or("未知原因")
            ));
        }
    }

    out.join("\n")
}

/// 期刊对比报告
pub fn render_comparison(rows: &[ComparisonRow]) -> String {
    let mut out = vec!["📊 期刊对比分析结果".to_string(), "=".repeat(50)];

    out.push(format!(
        "\n{:<30} {:<15} {:<15} {:<15}",
        "期刊名称", "最新影响因子", "最新分区", "预警状态"
    ));
    out.push("-".repeat(80));

    for row in rows {
        if !row.has_data {
            out.push(format!(
                "{:<30} {:<15} {:<15} {:<15}",
                row.journal, NO_DATA, NO_DATA, NO_DATA
            ));
            continue;
        }

        let impact_factor = row
            .latest_impact_factor
            .map(format_impact_factor)
            .unwrap_or_else(|| NO_DATA.to_string());
        let partition = row.latest_partition.as_deref().unwrap_or(NO_DATA);
        let warning = if row.warned { "⚠️预警" } else { "正常" };

        out.push(format!(
            "{:<30} {:<15} {:<15} {:<15}",
            row.journal, impact_factor, partition, warning
        ));
    }

    out.push("\n💡 投稿建议:".to_string());
    for row in rows {
        let Some(recommendation) = row.recommendation else {
            continue;
        };
        let line = match recommendation {
            Recommendation::NotRecommended => {
                format!("  ❌ {}: 该期刊在预警名单中，不建议投稿", row.journal)
            }
            Recommendation::StronglyRecommended => {
                format!("  ⭐ {}: 顶级期刊，强烈推荐", row.journal)
            }
            Recommendation::Recommended => format!("  ✅ {}: 优质期刊，推荐投稿", row.journal),
            Recommendation::Consider => format!("  📝 {}: 可考虑投稿", row.journal),
        };
        out.push(line);
    }

    out.join("\n")
}

/// 单张数据表的统计
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub name: String,
    /// 读取行数失败时为 `None`
    pub row_count: Option<u64>,
    /// 已识别表的类型信息
    pub info: Option<TableInfo>,
}

/// 数据库信息报告
pub fn render_database_info(location: &str, tables: &[TableSummary]) -> String {
    let mut out = vec![
        "📊 JCR分区表数据库信息".to_string(),
        "=".repeat(30),
        format!("数据库路径: {}", location),
        format!("数据表数量: {}", tables.len()),
        "\n📋 可用数据表:".to_string(),
    ];

    for table in tables {
        let count = match table.row_count {
            Some(n) => format!("{} 条记录", n),
            None => "无法读取".to_string(),
        };
        let kind = match &table.info {
            Some(info) => format!(" [{}]", info.kind),
            None => String::new(),
        };
        out.push(format!("  • {}: {}{}", table.name, count, kind));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::{group_by_journal, partition_trend, summarize_for_comparison};
    use crate::core::models::{JournalRecord, TableKind};

    #[test]
    fn test_search_report_lists_only_present_fields() {
        let records = vec![
            JournalRecord {
                impact_factor: Some(50.5),
                partition: Some("1区".to_string()),
                ..JournalRecord::new("Nature", Some("2024".to_string()))
            },
            JournalRecord {
                ccf_level: Some("A".to_string()),
                ..JournalRecord::new("Nature", None)
            },
        ];

        let text = render_search_report(&group_by_journal(&records));
        assert!(text.contains("📚 期刊名称: Nature"));
        assert!(text.contains("【2024年】"));
        assert!(text.contains("影响因子: 50.5"));
        assert!(text.contains("分区: 1区"));
        assert!(text.contains("【未知年份】"));
        assert!(text.contains("CCF推荐等级: A"));
        assert!(!text.contains("预警状态"));
        assert!(text.find("【2024年】").unwrap() < text.find("【未知年份】").unwrap());
    }

    #[test]
    fn test_trend_single_point_omits_analysis() {
        let record = JournalRecord {
            partition: Some("Q1".to_string()),
            ..JournalRecord::new("Nature", Some("2024".to_string()))
        };
        let text = render_trend(&partition_trend(&[record]).unwrap());

        assert!(text.contains("2024年: Q1"));
        assert!(!text.contains("📊 趋势分析:"));
        assert!(!text.contains("顶级分区"));
        assert!(!text.contains("分区较低"));
        assert!(!text.contains("中等水平"));
    }

    #[test]
    fn test_trend_verdict_after_two_points() {
        let records = vec![
            JournalRecord {
                partition: Some("Q1".to_string()),
                ..JournalRecord::new("Nature", Some("2024".to_string()))
            },
            JournalRecord {
                partition: Some("Q2".to_string()),
                ..JournalRecord::new("Nature", Some("2023".to_string()))
            },
        ];
        let text = render_trend(&partition_trend(&records).unwrap());

        assert!(text.contains("📊 趋势分析:"));
        assert!(text.contains("✅ 该期刊保持在顶级分区"));
    }

    #[test]
    fn test_whole_impact_factor_keeps_one_decimal() {
        assert_eq!(format_impact_factor(3.0), "3.0");
        assert_eq!(format_impact_factor(50.5), "50.5");

        let lancet = JournalRecord {
            impact_factor: Some(3.0),
            partition: Some("Q4".to_string()),
            ..JournalRecord::new("Lancet", Some("2024".to_string()))
        };
        let report = render_search_report(&group_by_journal(&[lancet.clone()]));
        assert!(report.contains("影响因子: 3.0"));

        let rows = vec![
            summarize_for_comparison("Lancet", &[lancet]),
            summarize_for_comparison("Science", &[]),
        ];
        let text = render_comparison(&rows);
        let line = text.lines().find(|l| l.starts_with("Lancet")).unwrap();
        assert!(line.contains(" 3.0 "));
    }

    #[test]
    fn test_warning_report_empty_section_line() {
        let sections = vec![WarningListSection {
            table: "GJQKYJMD2024".to_string(),
            year: Some("2024".to_string()),
            entries: vec![],
        }];

        let text = render_warning_lists(&sections, Some("Nature"));
        assert!(text.contains("📅 2024年预警名单:"));
        assert!(text.contains("无匹配 'Nature' 的预警期刊"));

        let text = render_warning_lists(&sections, None);
        assert!(text.contains("该年度无预警期刊数据"));
    }

    #[test]
    fn test_comparison_report_no_data_row_and_advice() {
        let nature = JournalRecord {
            partition: Some("Q1".to_string()),
            impact_factor: Some(50.5),
            ..JournalRecord::new("Nature", Some("2024".to_string()))
        };
        let rows = vec![
            summarize_for_comparison("Nature", &[nature]),
            summarize_for_comparison("Science", &[]),
        ];

        let text = render_comparison(&rows);
        let science_line = text.lines().find(|l| l.starts_with("Science")).unwrap();
        assert_eq!(science_line.matches(NO_DATA).count(), 3);
        assert!(text.contains("⭐ Nature: 顶级期刊，强烈推荐"));
        assert!(!text.contains("Science: "));
    }

    #[test]
    fn test_database_info_lines() {
        let tables = vec![
            TableSummary {
                name: "JCR2024".to_string(),
                row_count: Some(3),
                info: Some(TableInfo {
                    name: "JCR2024".to_string(),
                    kind: TableKind::ImpactFactor,
                    year: Some("2024".to_string()),
                    columns: vec!["Journal".to_string()],
                }),
            },
            TableSummary {
                name: "broken".to_string(),
                row_count: None,
                info: None,
            },
        ];

        let text = render_database_info("/tmp/jcr.db", &tables);
        assert!(text.contains("数据库路径: /tmp/jcr.db"));
        assert!(text.contains("数据表数量: 2"));
        assert!(text.contains("• JCR2024: 3 条记录 [JCR影响因子]"));
        assert!(text.contains("• broken: 无法读取"));
    }
}
