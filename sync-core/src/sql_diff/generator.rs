use super::differ::{ColumnUpdate, FieldDiff, IndexDiff, diff_fields, diff_indexes};
use super::parser::{parse_field_map, parse_index_map};
use super::types::{ColumnDefinition, IndexDefinition, IndexType};
use crate::config::SyncConfig;
use crate::constants::diff::PRIMARY_KEY_CONSTRAINT_SUFFIX;
use crate::error::Result;
use tracing::info;

/// 一次对比的结果
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// 按输出顺序排列的 DDL：字段的新增、(可选)修改、删除，然后是索引的创建、删除
    pub statements: Vec<String>,
    /// 未对比字段时为 None
    pub field_diff: Option<FieldDiff>,
    /// 未对比索引时为 None
    pub index_diff: Option<IndexDiff>,
    pub description: String,
}

impl SyncReport {
    /// 每行一条语句
    pub fn script(&self) -> String {
        self.statements.join("\n")
    }

    /// 需要人工处理的条目数
    pub fn manual_review_count(&self) -> usize {
        let fields = self.field_diff.as_ref().map_or(0, |d| {
            d.tables_to_create.len() + d.tables_to_drop.len() + d.to_update.len()
        });
        let indexes = self.index_diff.as_ref().map_or(0, |d| {
            d.ambiguous_tables.len() + d.orphan_tables.len() + d.retyped.len()
        });
        fields + indexes
    }
}

/// 对比两份表结构文本，生成让待修改库与标准库对齐的 DDL
pub fn generate_sync_script(
    standard_sql: &str,
    modify_sql: &str,
    config: &SyncConfig,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    if config.scope.includes_fields() {
        info!("开始对比字段");
        let standard = parse_field_map(standard_sql)?;
        let modify = parse_field_map(modify_sql)?;
        let diff = diff_fields(&standard, &modify, config);
        if diff.is_empty() {
            info!("✅ 字段无结构差异");
        }
        report
            .statements
            .extend(render_field_statements(&diff, config.render_updates));
        report.field_diff = Some(diff);
    }

    if config.scope.includes_indexes() {
        info!("开始对比索引");
        let standard = parse_index_map(standard_sql, config.case_sensitivity)?;
        let modify = parse_index_map(modify_sql, config.case_sensitivity)?;
        let diff = diff_indexes(&standard, &modify, config);
        if diff.is_empty() {
            info!("✅ 索引无结构差异");
        }
        report.statements.extend(render_index_statements(&diff));
        report.index_diff = Some(diff);
    }

    report.description = describe(&report);
    info!("差异生成完成: {}", report.description);
    Ok(report)
}

/// 字段差异转成 DDL：先新增，再修改（仅在开启时），最后删除
pub fn render_field_statements(diff: &FieldDiff, render_updates: bool) -> Vec<String> {
    let mut statements: Vec<String> = diff.to_add.iter().map(render_column_add).collect();
    if render_updates {
        statements.extend(diff.to_update.iter().map(render_column_modify));
    }
    statements.extend(diff.to_drop.iter().map(render_column_drop));
    statements
}

/// 索引差异转成 DDL：先创建，再删除
pub fn render_index_statements(diff: &IndexDiff) -> Vec<String> {
    diff.to_create
        .iter()
        .map(render_index_create)
        .chain(diff.to_drop.iter().map(render_index_drop))
        .collect()
}

pub fn render_column_add(column: &ColumnDefinition) -> String {
    format!(
        "ALTER TABLE {} ADD {};",
        column.table,
        column_spec(column)
    )
}

pub fn render_column_drop(column: &ColumnDefinition) -> String {
    format!("ALTER TABLE {} DROP COLUMN {};", column.table, column.field)
}

/// 按标准库的定义修改字段
pub fn render_column_modify(update: &ColumnUpdate) -> String {
    format!(
        "ALTER TABLE {} MODIFY COLUMN {};",
        update.standard.table,
        column_spec(&update.standard)
    )
}

pub fn render_index_create(index: &IndexDefinition) -> String {
    match index.index_type {
        IndexType::PrimaryKey => format!(
            "ALTER TABLE {table} ADD CONSTRAINT {table}{PRIMARY_KEY_CONSTRAINT_SUFFIX} PRIMARY KEY ({});",
            index.field_list,
            table = index.table
        ),
        IndexType::UniqueKey => format!(
            "CREATE UNIQUE INDEX {} ON {} ({});",
            index.display_name(),
            index.table,
            index.field_list
        ),
        IndexType::Key => format!(
            "CREATE INDEX {} ON {} ({});",
            index.display_name(),
            index.table,
            index.field_list
        ),
    }
}

pub fn render_index_drop(index: &IndexDefinition) -> String {
    match index.index_type {
        IndexType::PrimaryKey => format!("ALTER TABLE {} DROP PRIMARY KEY;", index.table),
        IndexType::UniqueKey | IndexType::Key => {
            format!("DROP INDEX {} ON {};", index.display_name(), index.table)
        }
    }
}

/// `<field> <type> [<nullability>]`
fn column_spec(column: &ColumnDefinition) -> String {
    match &column.nullability {
        Some(nullability) => format!(
            "{} {} {}",
            column.field, column.type_expression, nullability
        ),
        None => format!("{} {}", column.field, column.type_expression),
    }
}

/// 生成一行差异摘要
fn describe(report: &SyncReport) -> String {
    let mut parts = Vec::new();

    if let Some(diff) = &report.field_diff {
        push_count(&mut parts, "新增列", diff.to_add.len());
        push_count(&mut parts, "删除列", diff.to_drop.len());
        push_count(&mut parts, "待更新列", diff.to_update.len());
        push_count(&mut parts, "缺失表", diff.tables_to_create.len());
        push_count(&mut parts, "多余表", diff.tables_to_drop.len());
    }
    if let Some(diff) = &report.index_diff {
        push_count(&mut parts, "新增索引", diff.to_create.len());
        push_count(&mut parts, "删除索引", diff.to_drop.len());
        push_count(&mut parts, "索引类型变化", diff.retyped.len());
        push_count(&mut parts, "索引歧义表", diff.ambiguous_tables.len());
        push_count(&mut parts, "多余索引表", diff.orphan_tables.len());
    }

    if parts.is_empty() {
        return "无结构差异".to_string();
    }

    format!(
        "{} - 生成 {} 条差异SQL",
        parts.join("、"),
        report.statements.len()
    )
}

fn push_count(parts: &mut Vec<String>, label: &str, count: usize) {
    if count > 0 {
        parts.push(format!("{label} {count}"));
    }
}
