//! JCR 分区表查询
//!
//! 在本地 SQLite 缓存中检索期刊的影响因子、中科院分区、国际期刊预警名单
//! 和 CCF 推荐等级。数据表由外部导入流程按年份写入，表名和表头各不相同，
//! 这里负责识别数据表、统一字段，并把多年份、多来源的结果汇总成可读的报告。

pub mod core;
pub mod storage;

pub use crate::core::models::{JournalRecord, SearchResultSet, TableKind};
pub use crate::core::search::SearchOptions;
pub use crate::core::service::{journal_analysis_prompt, JournalService, LookupError};
pub use crate::storage::database::Database;
pub use crate::storage::{StoreError, TableStore};
