use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    /// 行通过了粗粒度的声明过滤，但无法用精确的提取规则解析
    #[error("表结构解析失败，规则 `{pattern}` 无法匹配行: {line}")]
    ParseGrammarMismatch { pattern: String, line: String },

    /// 同一张表存在多个覆盖相同字段的索引
    #[error("表 [{table}] 的索引存在歧义：字段 ({field_list}) 上建了多个索引")]
    AmbiguousIndexSet { table: String, field_list: String },

    #[error("无法读取表结构文件 {}: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置文件未找到: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("正则表达式编译失败: {0}")]
    Regex(#[from] regex::Error),

    #[error("自定义错误: {0}")]
    Custom(String),
}

impl SyncError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn grammar_mismatch(pattern: impl Into<String>, line: impl Into<String>) -> Self {
        Self::ParseGrammarMismatch {
            pattern: pattern.into(),
            line: line.into(),
        }
    }

    pub fn missing_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MissingInput {
            path: path.into(),
            source,
        }
    }
}
