//! 配置文件管理模块

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 指定数据库路径的环境变量
pub const DB_PATH_ENV: &str = "JCR_MCP_DB_PATH";

/// 默认数据目录名（位于用户主目录下）
const DATA_DIR_NAME: &str = ".jcr_mcp";
/// 默认数据库文件名
const DB_FILE_NAME: &str = "jcr.db";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 数据库路径（为空时使用默认路径）
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// 数据库文件不存在时是否创建空库
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
    /// search_journal 的年份参数是否真正参与过滤
    #[serde(default)]
    pub apply_year_filter: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
            apply_year_filter: false,
        }
    }
}

impl AppConfig {
    /// 解析数据库路径
    ///
    /// 优先级：命令行参数 > 环境变量 > 配置文件 > 默认路径
    pub fn resolve_database_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        let from_env = std::env::var(DB_PATH_ENV).ok();
        self.resolve_database_path_with(explicit, from_env)
    }

    fn resolve_database_path_with(
        &self,
        explicit: Option<PathBuf>,
        from_env: Option<String>,
    ) -> PathBuf {
        explicit
            .or_else(|| {
                from_env
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(default_database_path)
    }
}

/// 默认数据库路径：~/.jcr_mcp/jcr.db
pub fn default_database_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

/// 配置管理器
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// 获取默认配置路径
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "jcr", "jcr-partition")
            .map(|d| d.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// 加载配置，文件不存在时返回默认配置
    pub fn load(&self) -> Result<AppConfig> {
        if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path)?;
            let config = serde_json::from_str(&content)?;
            tracing::debug!("已加载配置文件: {}", self.config_path.display());
            Ok(config)
        } else {
            Ok(AppConfig::default())
        }
    }
}
