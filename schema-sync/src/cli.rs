use crate::project_info::{metadata, version_info};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sync_core::{CaseSensitivity, DiffScope};

/// Schema Sync - 表结构对比与同步 SQL 生成工具
#[derive(Parser)]
#[command(name = "schema-sync")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径（不指定时依次查找 schema-sync.toml、.schema-sync.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// diff 命令参数，未指定的项沿用配置文件
#[derive(clap::Args, Debug, Default, Clone)]
pub struct DiffArgs {
    /// 标准库（以这个库为准）的表结构文件，mysqldump -d 导出
    #[arg(long, env = "SCHEMA_SYNC_STANDARD")]
    pub standard: Option<PathBuf>,

    /// 待修改库的表结构文件，mysqldump -d 导出
    #[arg(long, env = "SCHEMA_SYNC_MODIFY")]
    pub modify: Option<PathBuf>,

    /// 索引名与索引字段区分大小写
    #[arg(long)]
    pub case_sensitive: bool,

    /// 对比范围
    #[arg(long, help = "对比范围: fields | indexes | all")]
    pub scope: Option<DiffScope>,

    /// 为类型/可空性变化的字段生成 MODIFY COLUMN 语句
    #[arg(long)]
    pub render_updates: bool,

    /// 输出文件（默认输出到标准输出）
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DiffArgs {
    pub fn case_sensitivity(&self) -> Option<CaseSensitivity> {
        self.case_sensitive.then_some(CaseSensitivity::Sensitive)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 对比两份表结构并输出同步 SQL
    Diff(DiffArgs),
    /// 生成默认配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
}
