use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// 表名，统一转成小写后作为两份结构之间的关联键
pub type TableName = String;

/// 字段维度的表结构：表名 -> 字段集合
pub type FieldSchemaMap = BTreeMap<TableName, ColumnSet>;

/// 索引维度的表结构：表名 -> 按字段列表排序的索引
pub type IndexSchemaMap = BTreeMap<TableName, Vec<IndexDefinition>>;

/// 表字段定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub table: TableName,
    pub field: String,
    /// 类型原文，例如 `varchar(64)`
    pub type_expression: String,
    /// `NOT NULL` / `DEFAULT NULL` 等片段，缺失时退而取 `DEFAULT <value>`
    pub nullability: Option<String>,
}

/// 字段的身份：同一张表里同名即为同一字段，类型和可空性不参与比较
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    pub table: TableName,
    pub field: String,
}

impl ColumnDefinition {
    pub fn key(&self) -> ColumnKey {
        ColumnKey {
            table: self.table.clone(),
            field: self.field.clone(),
        }
    }

    /// 身份相同的前提下，类型与可空性是否也一致
    pub fn same_shape(&self, other: &ColumnDefinition) -> bool {
        self.type_expression == other.type_expression && self.nullability == other.nullability
    }
}

/// 一张表的字段集合，按声明顺序保存，同一身份只保留第一次出现的定义
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<ColumnDefinition>,
    positions: HashMap<ColumnKey, usize>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入字段，身份已存在时返回 false
    pub fn insert(&mut self, column: ColumnDefinition) -> bool {
        let key = column.key();
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key, self.columns.len());
        self.columns.push(column);
        true
    }

    pub fn get(&self, key: &ColumnKey) -> Option<&ColumnDefinition> {
        self.positions.get(key).map(|&idx| &self.columns[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnDefinition> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = ColumnDefinition>>(iter: I) -> Self {
        let mut set = ColumnSet::new();
        for column in iter {
            set.insert(column);
        }
        set
    }
}

/// 索引类型: 主键 / 唯一索引 / 普通索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexType {
    PrimaryKey,
    UniqueKey,
    Key,
}

impl IndexType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "PRIMARY KEY" => Some(Self::PrimaryKey),
            "UNIQUE KEY" => Some(Self::UniqueKey),
            "KEY" => Some(Self::Key),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::UniqueKey => "UNIQUE KEY",
            Self::Key => "KEY",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// 表索引定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    pub table: TableName,
    pub index_type: IndexType,
    /// 主键没有名称
    pub name: Option<String>,
    /// 括号内的字段列表原文，例如 `a,b`
    pub field_list: String,
}

/// 索引的身份：类型 + 字段列表，名称和所属表不参与比较
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexKey {
    pub index_type: IndexType,
    pub field_list: String,
}

impl IndexDefinition {
    pub fn key(&self) -> IndexKey {
        IndexKey {
            index_type: self.index_type,
            field_list: self.field_list.clone(),
        }
    }

    /// 展示用名称，主键固定显示为 PRIMARY
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("PRIMARY")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(table: &str, field: &str, ty: &str, nullability: Option<&str>) -> ColumnDefinition {
        ColumnDefinition {
            table: table.to_string(),
            field: field.to_string(),
            type_expression: ty.to_string(),
            nullability: nullability.map(str::to_string),
        }
    }

    #[test]
    fn test_column_key_ignores_type_and_nullability() {
        let a = column("t1", "name", "varchar(32)", Some("NOT NULL"));
        let b = column("t1", "name", "varchar(16)", None);
        assert_eq!(a.key(), b.key());
        assert!(!a.same_shape(&b));
        assert_ne!(a.key(), column("t2", "name", "varchar(32)", None).key());
    }

    #[test]
    fn test_column_set_keeps_first_definition() {
        let mut set = ColumnSet::new();
        assert!(set.insert(column("t1", "id", "int", Some("NOT NULL"))));
        assert!(!set.insert(column("t1", "id", "bigint", None)));
        assert!(set.insert(column("t1", "name", "varchar(32)", None)));

        assert_eq!(set.len(), 2);
        let id = set.get(&column("t1", "id", "", None).key()).unwrap();
        assert_eq!(id.type_expression, "int");
        let fields: Vec<&str> = set.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "name"]);
    }

    #[test]
    fn test_index_key_ignores_name() {
        let a = IndexDefinition {
            table: "t1".to_string(),
            index_type: IndexType::Key,
            name: Some("idx_a".to_string()),
            field_list: "a,b".to_string(),
        };
        let b = IndexDefinition {
            name: Some("idx_other".to_string()),
            ..a.clone()
        };
        assert_eq!(a.key(), b.key());
        assert_eq!(IndexType::from_keyword("UNIQUE KEY"), Some(IndexType::UniqueKey));
        assert_eq!(IndexType::from_keyword("FULLTEXT KEY"), None);
        assert_eq!(IndexType::PrimaryKey.to_string(), "PRIMARY KEY");
    }
}
