use super::types::{
    ColumnDefinition, ColumnSet, FieldSchemaMap, IndexDefinition, IndexSchemaMap, IndexType,
    TableName,
};
use crate::config::CaseSensitivity;
use crate::constants::grammar;
use crate::error::{Result, SyncError};
use regex::Regex;
use tracing::{debug, info};

/// 表结构文件的行级语法
///
/// 先用粗粒度规则判断一行属于表头、字段还是索引，再用精确规则提取各部分。
/// 粗过滤命中但精确规则失配视为致命错误，不做猜测式的容错
pub struct DumpGrammar {
    table_header: Regex,
    versioned_table_header: Regex,
    table_name: Regex,
    column_line: Regex,
    column_field: Regex,
    column_type: Regex,
    column_comment: Regex,
    column_nullability: Regex,
    column_default: Regex,
    index_line: Regex,
    index_type: Regex,
    index_name: Regex,
    index_fields: Regex,
}

impl DumpGrammar {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table_header: Regex::new(grammar::TABLE_HEADER_LINE)?,
            versioned_table_header: Regex::new(grammar::VERSIONED_TABLE_HEADER_LINE)?,
            table_name: Regex::new(grammar::TABLE_NAME)?,
            column_line: Regex::new(grammar::COLUMN_LINE)?,
            column_field: Regex::new(grammar::COLUMN_FIELD)?,
            column_type: Regex::new(grammar::COLUMN_TYPE)?,
            column_comment: Regex::new(grammar::COLUMN_COMMENT)?,
            column_nullability: Regex::new(grammar::COLUMN_NULLABILITY)?,
            column_default: Regex::new(grammar::COLUMN_DEFAULT)?,
            index_line: Regex::new(grammar::INDEX_LINE)?,
            index_type: Regex::new(grammar::INDEX_TYPE)?,
            index_name: Regex::new(grammar::INDEX_NAME)?,
            index_fields: Regex::new(grammar::INDEX_FIELDS)?,
        })
    }

    pub fn is_table_header(&self, line: &str) -> bool {
        self.table_header.is_match(line)
    }

    pub fn is_versioned_table_header(&self, line: &str) -> bool {
        self.versioned_table_header.is_match(line)
    }

    pub fn is_column_line(&self, line: &str) -> bool {
        self.column_line.is_match(line)
    }

    pub fn is_index_line(&self, line: &str) -> bool {
        self.index_line.is_match(line)
    }

    /// 表名去掉反引号并转小写
    pub fn table_name(&self, line: &str) -> Result<TableName> {
        let name = capture(&self.table_name, grammar::TABLE_NAME, line)?;
        Ok(strip_backticks(&name).to_lowercase())
    }

    pub fn column_field(&self, line: &str) -> Result<String> {
        capture(&self.column_field, grammar::COLUMN_FIELD, line)
    }

    pub fn column_type(&self, line: &str) -> Result<String> {
        capture(&self.column_type, grammar::COLUMN_TYPE, line)
    }

    /// 可空性：优先取最后一个 `[NOT|DEFAULT] NULL`，否则取 `DEFAULT <value>`，都没有时为 None
    ///
    /// `COMMENT '...'` 之后的内容不参与匹配
    pub fn column_nullability(&self, line: &str) -> Option<String> {
        let head = self
            .column_comment
            .find(line)
            .map_or(line, |m| &line[..m.start()]);
        if let Some(caps) = self.column_nullability.captures_iter(head).last() {
            return Some(caps[1].trim().to_string());
        }
        self.column_default
            .captures(head)
            .map(|caps| caps[1].trim().to_string())
    }

    pub fn index_type(&self, line: &str) -> Result<IndexType> {
        let keyword = capture(&self.index_type, grammar::INDEX_TYPE, line)?;
        IndexType::from_keyword(&keyword)
            .ok_or_else(|| SyncError::grammar_mismatch(grammar::INDEX_TYPE, line))
    }

    pub fn index_name(&self, line: &str) -> Result<String> {
        let name = capture(&self.index_name, grammar::INDEX_NAME, line)?;
        Ok(strip_backticks(&name))
    }

    /// 字段列表去掉反引号，逗号两侧的空白统一去除
    pub fn index_fields(&self, line: &str) -> Result<String> {
        let fields = capture(&self.index_fields, grammar::INDEX_FIELDS, line)?;
        Ok(strip_backticks(&fields)
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(","))
    }

    /// 把一行字段声明转换为字段定义
    pub fn parse_column_line(&self, table: &str, line: &str) -> Result<ColumnDefinition> {
        let field = self.column_field(line)?;
        let type_expression = self.column_type(line)?;
        Ok(ColumnDefinition {
            table: table.to_string(),
            field: field.to_lowercase(),
            type_expression: type_expression.to_lowercase(),
            nullability: self.column_nullability(line),
        })
    }

    /// 把一行索引声明转换为索引定义
    pub fn parse_index_line(
        &self,
        table: &str,
        line: &str,
        case_sensitivity: CaseSensitivity,
    ) -> Result<IndexDefinition> {
        let index_type = self.index_type(line)?;
        let name = match index_type {
            IndexType::PrimaryKey => None,
            _ => Some(case_sensitivity.normalize(&self.index_name(line)?)),
        };
        let field_list = case_sensitivity.normalize(&self.index_fields(line)?);
        Ok(IndexDefinition {
            table: table.to_string(),
            index_type,
            name,
            field_list,
        })
    }
}

/// 一张表的声明行，按出现顺序保存
#[derive(Debug)]
struct TableSection<'a> {
    name: TableName,
    lines: Vec<&'a str>,
}

/// 按表头切分表结构文本，只保留 `is_declaration` 认可的行
///
/// 版本注释里的 `CREATE TABLE`（视图占位表）不开启新表，其后的声明行一直丢弃到下一个真正的表头
fn segment_tables<'a>(
    grammar: &DumpGrammar,
    sql_content: &'a str,
    is_declaration: impl Fn(&str) -> bool,
) -> Result<Vec<TableSection<'a>>> {
    let mut sections: Vec<TableSection<'a>> = Vec::new();
    let mut in_placeholder = false;

    for (line_idx, line) in sql_content.lines().enumerate() {
        if grammar.is_table_header(line) {
            let name = grammar.table_name(line)?;
            debug!("第 {} 行开始解析表: {}", line_idx + 1, name);
            sections.push(TableSection {
                name,
                lines: Vec::new(),
            });
            in_placeholder = false;
            continue;
        }

        if grammar.is_versioned_table_header(line) {
            debug!("第 {} 行是版本注释中的占位表，跳过: {}", line_idx + 1, line);
            in_placeholder = true;
            continue;
        }

        if in_placeholder || !is_declaration(line) {
            continue;
        }

        match sections.last_mut() {
            Some(section) => section.lines.push(line),
            None => debug!("第 {} 行位于任何表定义之前，忽略: {}", line_idx + 1, line),
        }
    }

    Ok(sections)
}

/// 解析表结构文本中每张表的字段
///
/// 没有任何字段声明的表也会出现在结果中，值为空集合
pub fn parse_field_map(sql_content: &str) -> Result<FieldSchemaMap> {
    let grammar = DumpGrammar::new()?;
    let sections = segment_tables(&grammar, sql_content, |line| grammar.is_column_line(line))?;

    let mut tables = FieldSchemaMap::new();
    for section in sections {
        let mut columns = ColumnSet::new();
        for line in &section.lines {
            let column = grammar.parse_column_line(&section.name, line)?;
            if !columns.insert(column) {
                debug!("表 [{}] 存在重复字段声明，忽略: {}", section.name, line.trim());
            }
        }
        debug!("表 [{}] 解析到 {} 个字段", section.name, columns.len());
        if tables.insert(section.name.clone(), columns).is_some() {
            debug!("表 [{}] 重复定义，以最后一次为准", section.name);
        }
    }

    info!("成功解析 {} 个表的字段", tables.len());
    Ok(tables)
}

/// 解析表结构文本中每张表的索引
///
/// 每张表的索引按字段列表排序；没有索引的表不出现在结果中
pub fn parse_index_map(
    sql_content: &str,
    case_sensitivity: CaseSensitivity,
) -> Result<IndexSchemaMap> {
    let grammar = DumpGrammar::new()?;
    let sections = segment_tables(&grammar, sql_content, |line| grammar.is_index_line(line))?;

    let mut tables = IndexSchemaMap::new();
    for section in sections {
        let mut indexes = section
            .lines
            .iter()
            .map(|line| grammar.parse_index_line(&section.name, line, case_sensitivity))
            .collect::<Result<Vec<_>>>()?;

        if indexes.is_empty() {
            continue;
        }

        indexes.sort_by(|a, b| a.field_list.cmp(&b.field_list));
        debug!("表 [{}] 解析到 {} 个索引", section.name, indexes.len());
        tables.insert(section.name, indexes);
    }

    info!("成功解析 {} 个表的索引", tables.len());
    Ok(tables)
}

/// 用规则提取第一个捕获组，失配时返回携带规则与原始行的错误
fn capture(regex: &Regex, pattern: &str, line: &str) -> Result<String> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| SyncError::grammar_mismatch(pattern, line))
}

fn strip_backticks(s: &str) -> String {
    s.replace('`', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> DumpGrammar {
        DumpGrammar::new().unwrap()
    }

    #[test]
    fn test_table_header_rules() {
        let g = grammar();
        assert!(g.is_table_header("CREATE TABLE `t_user` ("));
        assert!(!g.is_table_header("  CREATE TABLE `t_user` ("));
        assert!(!g.is_table_header("create table t_user ("));
        assert_eq!(g.table_name("CREATE TABLE `T_User` (").unwrap(), "t_user");
        assert_eq!(g.table_name("CREATE TABLE t1(").unwrap(), "t1");
        assert_eq!(
            g.table_name("CREATE TABLE IF NOT EXISTS `t2` (").unwrap(),
            "t2"
        );
        assert!(matches!(
            g.table_name("CREATE TABLE"),
            Err(SyncError::ParseGrammarMismatch { .. })
        ));
    }

    #[test]
    fn test_versioned_table_header_rules() {
        let g = grammar();
        assert!(g.is_versioned_table_header("/*!50001 CREATE TABLE `v_user` ("));
        assert!(g.is_versioned_table_header("/*!CREATE TABLE `v_user` ("));
        assert!(!g.is_versioned_table_header("CREATE TABLE `t_user` ("));
        assert!(!g.is_versioned_table_header("/*!50001 CREATE VIEW `v_user` AS select 1 */;"));
        assert!(!g.is_table_header("/*!50001 CREATE TABLE `v_user` ("));
    }

    #[test]
    fn test_view_placeholder_table_is_skipped() {
        let dump = "\
CREATE TABLE `t1` (
  `id` int NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB;
/*!50001 CREATE TABLE `v1` (
  `vid` tinyint NOT NULL,
  KEY `idx_vid` (`vid`)
) ENGINE=MyISAM */;
CREATE TABLE `t2` (
  `name` varchar(32) DEFAULT NULL
) ENGINE=InnoDB;
";
        let fields = parse_field_map(dump).unwrap();
        assert_eq!(fields.len(), 2);
        let t1: Vec<_> = fields["t1"].iter().map(|c| c.field.as_str()).collect();
        assert_eq!(t1, vec!["id"]);
        let t2: Vec<_> = fields["t2"].iter().map(|c| c.field.as_str()).collect();
        assert_eq!(t2, vec!["name"]);
        assert!(!fields.contains_key("v1"));

        let indexes = parse_index_map(dump, CaseSensitivity::Insensitive).unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes["t1"].len(), 1);
        assert_eq!(indexes["t1"][0].field_list, "id");
    }

    #[test]
    fn test_column_line_rules() {
        let g = grammar();
        let line = "  `user_name` varchar(64) COLLATE utf8mb4_bin NOT NULL COMMENT '用户名',";
        assert!(g.is_column_line(line));
        assert!(!g.is_column_line("  PRIMARY KEY (`id`),"));
        assert!(!g.is_column_line("`id` int NOT NULL,"));
        assert_eq!(g.column_field(line).unwrap(), "user_name");
        assert_eq!(g.column_type(line).unwrap(), "varchar(64)");
        assert_eq!(g.column_nullability(line).as_deref(), Some("NOT NULL"));
    }

    #[test]
    fn test_column_type_without_trailing_clause() {
        let g = grammar();
        assert_eq!(g.column_type("  `note` text,").unwrap(), "text");
        assert_eq!(g.column_type("  `note` text").unwrap(), "text");
        assert_eq!(
            g.column_type("  `price` decimal(10,2) DEFAULT '0.00',").unwrap(),
            "decimal(10,2)"
        );
        assert!(g.column_type("  `orphan`").is_err());
    }

    #[test]
    fn test_column_nullability_alternatives() {
        let g = grammar();
        assert_eq!(
            g.column_nullability("  `a` varchar(8) DEFAULT NULL,").as_deref(),
            Some("DEFAULT NULL")
        );
        assert_eq!(
            g.column_nullability("  `a` int NULL,").as_deref(),
            Some("NULL")
        );
        assert_eq!(
            g.column_nullability("  `a` int DEFAULT '0' COMMENT 'x',").as_deref(),
            Some("DEFAULT '0'")
        );
        assert_eq!(
            g.column_nullability(
                "  `ts` datetime DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,"
            )
            .as_deref(),
            Some("DEFAULT CURRENT_TIMESTAMP")
        );
        assert_eq!(
            g.column_nullability(
                "  `remark` varchar(64) NOT NULL COMMENT 'empty string, never NULL',"
            )
            .as_deref(),
            Some("NOT NULL")
        );
        assert_eq!(
            g.column_nullability("  `a` varchar(8) DEFAULT 'x' COMMENT 'may be NULL',")
                .as_deref(),
            Some("DEFAULT 'x'")
        );
        assert_eq!(
            g.column_nullability("  `a` int COMMENT 'DEFAULT 1 or NULL',"),
            None
        );
        assert_eq!(g.column_nullability("  `a` int,"), None);
        assert_eq!(g.column_nullability("  `a` int NULLABLE_FLAG,"), None);
    }

    #[test]
    fn test_index_line_rules() {
        let g = grammar();
        let pk = "  PRIMARY KEY (`id`),";
        let uk = "  UNIQUE KEY `uk_Name` (`Name`,`tenant_id`) USING BTREE,";
        let key = "  KEY `idx_created` (`created_at`)";

        assert!(g.is_index_line(pk) && g.is_index_line(uk) && g.is_index_line(key));
        assert!(!g.is_index_line("  FULLTEXT KEY `ft` (`body`),"));
        assert!(!g.is_index_line("  CONSTRAINT `fk` FOREIGN KEY (`a`) REFERENCES `b` (`id`)"));

        assert_eq!(g.index_type(pk).unwrap(), IndexType::PrimaryKey);
        assert_eq!(g.index_type(uk).unwrap(), IndexType::UniqueKey);
        assert_eq!(g.index_type(key).unwrap(), IndexType::Key);

        assert_eq!(g.index_name(uk).unwrap(), "uk_Name");
        assert_eq!(g.index_fields(uk).unwrap(), "Name,tenant_id");
        assert_eq!(g.index_fields("  KEY `k` (`a`, `b`)").unwrap(), "a,b");
    }

    #[test]
    fn test_index_case_sensitivity() {
        let g = grammar();
        let uk = "  UNIQUE KEY `uk_Name` (`Name`),";
        let insensitive = g
            .parse_index_line("t1", uk, CaseSensitivity::Insensitive)
            .unwrap();
        assert_eq!(insensitive.name.as_deref(), Some("uk_name"));
        assert_eq!(insensitive.field_list, "name");

        let sensitive = g
            .parse_index_line("t1", uk, CaseSensitivity::Sensitive)
            .unwrap();
        assert_eq!(sensitive.name.as_deref(), Some("uk_Name"));
        assert_eq!(sensitive.field_list, "Name");
    }

    #[test]
    fn test_index_without_name_is_fatal() {
        let g = grammar();
        let err = g
            .parse_index_line("t1", "  KEY (`a`),", CaseSensitivity::Insensitive)
            .unwrap_err();
        match err {
            SyncError::ParseGrammarMismatch { pattern, line } => {
                assert_eq!(pattern, grammar::INDEX_NAME);
                assert_eq!(line, "  KEY (`a`),");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_primary_key_has_no_name() {
        let g = grammar();
        let pk = g
            .parse_index_line("t1", "  PRIMARY KEY (`id`,`Seq`),", CaseSensitivity::Insensitive)
            .unwrap();
        assert_eq!(pk.name, None);
        assert_eq!(pk.field_list, "id,seq");
    }
}
