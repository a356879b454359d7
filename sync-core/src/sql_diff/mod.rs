mod differ;
mod generator;
mod parser;
mod types;


// 重新导出公共接口
pub use differ::{
    ColumnUpdate, FieldDiff, IndexDiff, IndexRetype, build_index_lookup, diff_fields,
    diff_indexes,
};
pub use generator::{
    SyncReport, generate_sync_script, render_column_add, render_column_drop,
    render_column_modify, render_field_statements, render_index_create, render_index_drop,
    render_index_statements,
};
pub use parser::{DumpGrammar, parse_field_map, parse_index_map};
pub use types::{
    ColumnDefinition, ColumnKey, ColumnSet, FieldSchemaMap, IndexDefinition, IndexKey,
    IndexSchemaMap, IndexType, TableName,
};
