use super::types::{
    ColumnDefinition, ColumnSet, FieldSchemaMap, IndexDefinition, IndexSchemaMap, TableName,
};
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// 同名字段在两边的类型或可空性不一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnUpdate {
    pub standard: ColumnDefinition,
    pub modify: ColumnDefinition,
}

/// 字段维度的差异
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDiff {
    /// 标准库有、待修改库整表缺失
    pub tables_to_create: Vec<TableName>,
    /// 待修改库多出的表（已排除临时表）
    pub tables_to_drop: Vec<TableName>,
    pub to_add: Vec<ColumnDefinition>,
    pub to_drop: Vec<ColumnDefinition>,
    /// 需要人工确认的字段变更
    pub to_update: Vec<ColumnUpdate>,
}

impl FieldDiff {
    pub fn is_empty(&self) -> bool {
        self.tables_to_create.is_empty()
            && self.tables_to_drop.is_empty()
            && self.to_add.is_empty()
            && self.to_drop.is_empty()
            && self.to_update.is_empty()
    }
}

/// 两边字段列表相同但索引类型不同，例如 KEY 变成了 UNIQUE KEY
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRetype {
    pub standard: IndexDefinition,
    pub modify: IndexDefinition,
}

/// 索引维度的差异
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDiff {
    pub to_create: Vec<IndexDefinition>,
    pub to_drop: Vec<IndexDefinition>,
    /// 同一字段列表上建了多个索引的表，整表跳过
    pub ambiguous_tables: Vec<TableName>,
    /// 只在待修改库中有索引的表（已排除临时表），整表待删除，不逐个删索引
    pub orphan_tables: Vec<TableName>,
    pub retyped: Vec<IndexRetype>,
}

impl IndexDiff {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty()
            && self.to_drop.is_empty()
            && self.ambiguous_tables.is_empty()
            && self.orphan_tables.is_empty()
            && self.retyped.is_empty()
    }
}

/// 对比两边的字段
///
/// 先按完整定义做集合差得到新增/删除候选，再把两边都出现的同名字段
/// 归为"需要更新"，它们不再出现在新增和删除结果中
pub fn diff_fields(
    standard: &FieldSchemaMap,
    modify: &FieldSchemaMap,
    config: &SyncConfig,
) -> FieldDiff {
    let mut diff = FieldDiff::default();

    for table_name in modify.keys() {
        if standard.contains_key(table_name) {
            continue;
        }
        if config.is_scratch_table(table_name) {
            debug!("临时表 [{}] 只存在于待修改库，忽略", table_name);
            continue;
        }
        warn!("这个表: [{}] 要删除", table_name);
        diff.tables_to_drop.push(table_name.clone());
    }

    for (table_name, standard_columns) in standard {
        let Some(modify_columns) = modify.get(table_name) else {
            warn!("这个表: [{}] 需要新增", table_name);
            diff.tables_to_create.push(table_name.clone());
            continue;
        };

        let add = full_difference(standard_columns, modify_columns);
        let drop = full_difference(modify_columns, standard_columns);

        let drop_fields: HashSet<&str> = drop.iter().map(|c| c.field.as_str()).collect();
        let update_fields: HashSet<&str> = add
            .iter()
            .map(|c| c.field.as_str())
            .filter(|field| drop_fields.contains(field))
            .collect();

        for column in &add {
            if !update_fields.contains(column.field.as_str()) {
                diff.to_add.push((*column).clone());
                continue;
            }
            if let Some(current) = modify_columns.get(&column.key()) {
                warn!(
                    "需要更新的表-字段: [{}].{} {} -> {}",
                    table_name,
                    column.field,
                    describe_column(current),
                    describe_column(column)
                );
                diff.to_update.push(ColumnUpdate {
                    standard: (*column).clone(),
                    modify: current.clone(),
                });
            }
        }

        diff.to_drop.extend(
            drop.into_iter()
                .filter(|c| !update_fields.contains(c.field.as_str()))
                .cloned(),
        );
    }

    info!(
        "字段对比完成: 新增 {} 个, 删除 {} 个, 待更新 {} 个, 缺失表 {} 个, 多余表 {} 个",
        diff.to_add.len(),
        diff.to_drop.len(),
        diff.to_update.len(),
        diff.tables_to_create.len(),
        diff.tables_to_drop.len()
    );
    diff
}

/// `left` 中在 `right` 里找不到完全相同定义的字段
fn full_difference<'a>(left: &'a ColumnSet, right: &ColumnSet) -> Vec<&'a ColumnDefinition> {
    left.iter()
        .filter(|column| match right.get(&column.key()) {
            Some(other) => !column.same_shape(other),
            None => true,
        })
        .collect()
}

fn describe_column(column: &ColumnDefinition) -> String {
    match &column.nullability {
        Some(nullability) => format!("{} {}", column.type_expression, nullability),
        None => column.type_expression.clone(),
    }
}

/// 对比两边的索引
///
/// 以字段列表为键：标准库有而待修改库没有的需要创建，反之需要删除。
/// 某张表同一字段列表上有多个索引时无法建立对应关系，记录后跳过该表
pub fn diff_indexes(
    standard: &IndexSchemaMap,
    modify: &IndexSchemaMap,
    config: &SyncConfig,
) -> IndexDiff {
    let mut diff = IndexDiff::default();

    for table_name in modify.keys() {
        if standard.contains_key(table_name) {
            continue;
        }
        if config.is_scratch_table(table_name) {
            debug!("临时表 [{}] 的索引只存在于待修改库，忽略", table_name);
            continue;
        }
        warn!("这个表: [{}] 的索引只存在于待修改库，整表待删除", table_name);
        diff.orphan_tables.push(table_name.clone());
    }

    for (table_name, standard_indexes) in standard {
        let Some(modify_indexes) = modify.get(table_name) else {
            diff.to_create.extend(standard_indexes.iter().cloned());
            continue;
        };

        let lookups = build_index_lookup(table_name, standard_indexes).and_then(|standard_lookup| {
            build_index_lookup(table_name, modify_indexes)
                .map(|modify_lookup| (standard_lookup, modify_lookup))
        });
        let (standard_lookup, modify_lookup) = match lookups {
            Ok(lookups) => lookups,
            Err(e) => {
                warn!("{}，该表索引需要人工处理", e);
                diff.ambiguous_tables.push(table_name.clone());
                continue;
            }
        };

        for index in standard_indexes {
            match modify_lookup.get(index.field_list.as_str()) {
                None => diff.to_create.push(index.clone()),
                Some(current) if current.key() != index.key() => {
                    warn!(
                        "表 [{}] 字段 ({}) 上的索引类型不一致: {} -> {}",
                        table_name, index.field_list, current.index_type, index.index_type
                    );
                    diff.retyped.push(IndexRetype {
                        standard: index.clone(),
                        modify: (*current).clone(),
                    });
                }
                Some(_) => {}
            }
        }

        diff.to_drop.extend(
            modify_indexes
                .iter()
                .filter(|index| !standard_lookup.contains_key(index.field_list.as_str()))
                .cloned(),
        );
    }

    info!(
        "索引对比完成: 创建 {} 个, 删除 {} 个, 类型变化 {} 个, 歧义表 {} 个",
        diff.to_create.len(),
        diff.to_drop.len(),
        diff.retyped.len(),
        diff.ambiguous_tables.len()
    );
    diff
}

/// 建立 字段列表 -> 索引 的映射，字段列表重复时返回 `AmbiguousIndexSet`
pub fn build_index_lookup<'a>(
    table: &str,
    indexes: &'a [IndexDefinition],
) -> Result<HashMap<&'a str, &'a IndexDefinition>> {
    let mut lookup = HashMap::with_capacity(indexes.len());
    for index in indexes {
        if lookup.insert(index.field_list.as_str(), index).is_some() {
            return Err(SyncError::AmbiguousIndexSet {
                table: table.to_string(),
                field_list: index.field_list.clone(),
            });
        }
    }
    Ok(lookup)
}
