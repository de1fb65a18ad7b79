//! jcr-partition - JCR 分区表查询工具
//!
//! 命令行只负责解析参数、打开数据库，然后把请求转交给 `JournalService`。

use anyhow::Result;
use clap::{Parser, Subcommand};
use jcr_partition::storage::config::{AppConfig, ConfigManager};
use jcr_partition::{journal_analysis_prompt, Database, JournalService, SearchOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "JCR 分区表 / 预警名单 / CCF 目录本地查询")]
struct Cli {
    /// 数据库路径（优先于环境变量和配置文件）
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// 配置文件路径
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 搜索期刊信息
    Search {
        journal_name: String,
        #[arg(long)]
        year: Option<String>,
    },
    /// 期刊分区变化趋势
    Trends { journal_name: String },
    /// 国际期刊预警名单
    Warnings {
        #[arg(long)]
        keywords: Option<String>,
    },
    /// 对比多个期刊（逗号分隔）
    Compare { journal_list: String },
    /// 数据库信息
    Info,
    /// 健康检查
    Health,
    /// 期刊分析提示词
    Prompt { journal_name: String },
}

impl Command {
    /// 数据库打不开时的错误前缀，与各入口自身的出错前缀一致
    fn failure_prefix(&self) -> &'static str {
        match self {
            Command::Search { .. } => "查询出错",
            Command::Trends { .. } => "分析出错",
            Command::Warnings { .. } => "查询预警期刊出错",
            Command::Compare { .. } => "比较分析出错",
            Command::Info => "获取数据库信息出错",
            Command::Health => "ERROR",
            Command::Prompt { .. } => "生成提示词出错",
        }
    }
}

fn main() -> Result<ExitCode> {
    // 初始化日志（输出到 stderr，stdout 只留给查询结果）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ConfigManager::default_path);
    let config: AppConfig = ConfigManager::new(config_path).load()?;
    let db_path = config.resolve_database_path(cli.db.clone());

    tracing::info!("启动 JCR 分区表查询，数据库路径: {}", db_path.display());

    // 提示词不需要读取数据库
    if let Command::Prompt { journal_name } = &cli.command {
        println!("{}", journal_analysis_prompt(journal_name));
        return Ok(ExitCode::SUCCESS);
    }

    let db = match Database::open(&db_path, config.create_if_missing) {
        Ok(db) => db,
        Err(e) => {
            println!("{}: {}", cli.command.failure_prefix(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let service = JournalService::new(
        db,
        SearchOptions {
            apply_year_filter: config.apply_year_filter,
        },
    );

    let output = match &cli.command {
        Command::Search { journal_name, year } => {
            service.search_journal(journal_name, year.as_deref())
        }
        Command::Trends { journal_name } => service.get_partition_trends(journal_name),
        Command::Warnings { keywords } => service.check_warning_journals(keywords.as_deref()),
        Command::Compare { journal_list } => service.compare_journals(journal_list),
        Command::Info => service.get_database_info(),
        Command::Health => service.health_check(),
        Command::Prompt { journal_name } => journal_analysis_prompt(journal_name),
    };

    println!("{}", output);

    if matches!(cli.command, Command::Health) && output.starts_with("ERROR:") {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
