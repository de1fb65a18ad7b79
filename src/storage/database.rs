//! 数据库存储模块
//!
//! 使用SQLite读取导入好的期刊数据表（JCR、分区表、预警名单、CCF）

use crate::storage::{RawRow, RowFilter, StoreError, TableStore, JOURNAL_COLUMN};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// 数据库管理器
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// 打开数据库
    ///
    /// `create_if_missing` 为真时，文件不存在会创建一个空库；否则以只读方式打开。
    pub fn open(path: &Path, create_if_missing: bool) -> Result<Self, StoreError> {
        let unavailable = |source| StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        };

        let conn = if create_if_missing {
            // 确保目录存在
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
            Connection::open(path).map_err(unavailable)?
        } else {
            Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(unavailable)?
        };

        tracing::info!("已打开数据库: {}", path.display());
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    fn table_error(table: &str) -> impl FnOnce(rusqlite::Error) -> StoreError + '_ {
        move |source| StoreError::TableAccess {
            table: table.to_string(),
            source,
        }
    }
}

/// 引用标识符（表名、列名）
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 将单元格转换为文本
fn cell_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

impl TableStore for Database {
    fn location(&self) -> &Path {
        &self.path
    }

    fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let unavailable = |source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        };

        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
            .map_err(unavailable)?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(unavailable)?;

        names.collect::<Result<Vec<_>, _>>().map_err(unavailable)
    }

    fn columns(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        let mut stmt = self.conn.prepare(&sql).map_err(Self::table_error(table))?;

        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(Self::table_error(table))?;

        columns
            .collect::<Result<Vec<_>, _>>()
            .map_err(Self::table_error(table))
    }

    fn query(&self, table: &str, filter: Option<&RowFilter>) -> Result<Vec<RawRow>, StoreError> {
        let mut sql = format!("SELECT * FROM {}", quote_ident(table));
        let mut params: Vec<String> = Vec::new();

        if let Some(RowFilter::JournalContains(pattern)) = filter {
            sql.push_str(&format!(
                " WHERE {} LIKE ?1 COLLATE NOCASE",
                quote_ident(JOURNAL_COLUMN)
            ));
            params.push(format!("%{}%", pattern));
        }

        let mut stmt = self.conn.prepare(&sql).map_err(Self::table_error(table))?;
        let column_names: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                let mut raw = RawRow::new();
                for (i, name) in column_names.iter().enumerate() {
                    raw.insert(name.clone(), cell_text(row.get_ref(i)?));
                }
                Ok(raw)
            })
            .map_err(Self::table_error(table))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(Self::table_error(table))
    }

    fn row_count(&self, table: &str) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(Self::table_error(table))?;
        Ok(count.max(0) as u64)
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' LIMIT 1",
                [],
                |_| Ok(()),
            )
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(()),
                other => Err(other),
            })
            .map_err(|source| StoreError::Unavailable {
                path: self.path.clone(),
                source,
            })
    }
}
