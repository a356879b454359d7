/// 表结构文件（mysqldump -d 导出）的行级语法规则
///
/// 每条规则都是一个独立的正则表达式，解析器按名称引用，
/// 出错时会把规则原文放进错误信息里，方便定位是哪条规则失配
pub mod grammar {
    /// 表头行的粗过滤：大小写敏感的 `CREATE TABLE` 开头
    pub const TABLE_HEADER_LINE: &str = r"^CREATE TABLE";

    /// 包在版本注释里的表头，如 mysqldump 为视图生成的占位表 `/*!50001 CREATE TABLE`
    pub const VERSIONED_TABLE_HEADER_LINE: &str = r"^/\*!\d*\s*CREATE TABLE";

    /// 从表头行提取表名
    pub const TABLE_NAME: &str = r"^CREATE TABLE\s+(?:IF NOT EXISTS\s+)?(\S+?)\s*\(";

    /// 字段声明行的粗过滤：缩进 + 反引号标识符
    pub const COLUMN_LINE: &str = r"^\s+`\w+`";

    /// 提取字段名
    pub const COLUMN_FIELD: &str = r"^\s+`(\w*)`";

    /// 提取字段类型：标识符之后的第一个空白分隔片段
    pub const COLUMN_TYPE: &str = r"^\s+`\w+`\s+(\S+?),?(?:\s|$)";

    /// 字段注释的起点，可空性与默认值只在它之前查找
    pub const COLUMN_COMMENT: &str = r"\sCOMMENT\s+'";

    /// 提取 `NOT NULL` / `DEFAULT NULL` / `NULL`，取注释之前的最后一次出现
    pub const COLUMN_NULLABILITY: &str = r"\s((?:(?:NOT|DEFAULT)\s+)?NULL)\b";

    /// 没有 NULL 片段时退而提取 `DEFAULT <value>`
    pub const COLUMN_DEFAULT: &str = r"\s(DEFAULT\s+(?:'[^']*'|\S+?)),?(?:\s|$)";

    /// 索引声明行的粗过滤
    pub const INDEX_LINE: &str = r"^\s+(?:PRIMARY KEY|UNIQUE KEY|KEY)\b";

    /// 提取索引类型，`PRIMARY KEY` / `UNIQUE KEY` 优先于单独的 `KEY`
    pub const INDEX_TYPE: &str = r"^\s*(PRIMARY KEY|UNIQUE KEY|KEY)\b";

    /// 提取索引名：`KEY` 之后紧跟的标识符
    pub const INDEX_NAME: &str = r"\bKEY\s+([^\s(]+)";

    /// 提取索引字段列表：括号内的全部内容
    pub const INDEX_FIELDS: &str = r"\((.*)\)";
}

/// 差异计算相关常量
pub mod diff {
    /// 默认视为临时表的表名片段，这类表只在待修改库中存在时不提示删除
    pub const DEFAULT_SCRATCH_EXCLUSIONS: &[&str] = &["temp", "tmp"];

    /// 补建主键时约束名的后缀，形如 `<table>_pk`
    pub const PRIMARY_KEY_CONSTRAINT_SUFFIX: &str = "_pk";
}

/// 配置文件相关常量
pub mod config {
    use std::path::{Path, PathBuf};

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "schema-sync.toml";

    /// 隐藏配置文件名
    pub const HIDDEN_CONFIG_FILE_NAME: &str = ".schema-sync.toml";

    /// 按优先级排列的配置文件查找列表
    pub const CONFIG_SEARCH_ORDER: &[&str] = &[CONFIG_FILE_NAME, HIDDEN_CONFIG_FILE_NAME];

    /// 获取默认配置文件路径
    pub fn get_config_file_path() -> PathBuf {
        Path::new(".").join(CONFIG_FILE_NAME)
    }
}
