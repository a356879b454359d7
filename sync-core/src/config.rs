use crate::constants::{config, diff};
use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 索引名与索引字段的大小写处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    pub fn normalize(&self, value: &str) -> String {
        match self {
            Self::Sensitive => value.to_string(),
            Self::Insensitive => value.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sensitive => "sensitive",
            Self::Insensitive => "insensitive",
        }
    }
}

impl fmt::Display for CaseSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseSensitivity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sensitive" => Ok(Self::Sensitive),
            "insensitive" => Ok(Self::Insensitive),
            other => Err(format!(
                "无效的大小写选项: {other}，可选值: sensitive | insensitive"
            )),
        }
    }
}

/// 对比范围
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffScope {
    Fields,
    Indexes,
    #[default]
    All,
}

impl DiffScope {
    pub fn includes_fields(&self) -> bool {
        matches!(self, Self::Fields | Self::All)
    }

    pub fn includes_indexes(&self) -> bool {
        matches!(self, Self::Indexes | Self::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Indexes => "indexes",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DiffScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fields" => Ok(Self::Fields),
            "indexes" => Ok(Self::Indexes),
            "all" => Ok(Self::All),
            other => Err(format!(
                "无效的对比范围: {other}，可选值: fields | indexes | all"
            )),
        }
    }
}

/// 对比配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// 标准库（以这个库为准）的表结构文件
    pub standard_path: Option<PathBuf>,
    /// 待修改库的表结构文件
    pub modify_path: Option<PathBuf>,
    pub case_sensitivity: CaseSensitivity,
    pub scratch_exclusions: Vec<String>,
    pub render_updates: bool,
    pub scope: DiffScope,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            standard_path: None,
            modify_path: None,
            case_sensitivity: CaseSensitivity::default(),
            scratch_exclusions: diff::DEFAULT_SCRATCH_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            render_updates: false,
            scope: DiffScope::default(),
        }
    }
}

impl SyncConfig {
    /// 按优先级查找配置文件：schema-sync.toml -> .schema-sync.toml
    ///
    /// 都不存在时返回默认配置，此时文件路径需要由命令行提供
    pub fn find_and_load_config() -> Result<Self> {
        for config_file in config::CONFIG_SEARCH_ORDER {
            if Path::new(config_file).exists() {
                tracing::info!("找到配置文件: {}", config_file);
                return Self::load_from_file(config_file);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SyncError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: SyncConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments();
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> String {
        const TEMPLATE: &str = include_str!("../templates/schema-sync.toml.template");

        let scratch = toml::Value::Array(
            self.scratch_exclusions
                .iter()
                .cloned()
                .map(toml::Value::String)
                .collect(),
        );

        TEMPLATE
            .replace(
                "{standard_path_line}",
                &path_line("standard_path", self.standard_path.as_deref(), "standard.sql"),
            )
            .replace(
                "{modify_path_line}",
                &path_line("modify_path", self.modify_path.as_deref(), "modify.sql"),
            )
            .replace("{case_sensitivity}", self.case_sensitivity.as_str())
            .replace("{scratch_exclusions}", &scratch.to_string())
            .replace("{render_updates}", &self.render_updates.to_string())
            .replace("{scope}", self.scope.as_str())
    }

    /// 表名包含任一临时表片段时视为临时表
    pub fn is_scratch_table(&self, table: &str) -> bool {
        self.scratch_exclusions
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .any(|fragment| table.contains(fragment.as_str()))
    }

    /// 取出两份表结构文件路径，缺任何一个都报错
    pub fn require_paths(&self) -> Result<(&Path, &Path)> {
        let standard = self
            .standard_path
            .as_deref()
            .ok_or_else(|| SyncError::custom("缺少标准库表结构文件路径 (standard_path)"))?;
        let modify = self
            .modify_path
            .as_deref()
            .ok_or_else(|| SyncError::custom("缺少待修改库表结构文件路径 (modify_path)"))?;
        Ok((standard, modify))
    }
}

/// 路径未配置时输出注释掉的示例行
fn path_line(key: &str, path: Option<&Path>, example: &str) -> String {
    match path {
        Some(path) => format!(
            "{key} = {}",
            toml::Value::String(path.to_string_lossy().to_string())
        ),
        None => format!("# {key} = \"{example}\""),
    }
}
