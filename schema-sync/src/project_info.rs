/// Schema Sync 项目信息模块
///
/// schema-sync 是面向用户的主程序，项目元数据统一在这里定义，
/// sync-core 作为内部库只提供技术性常量

/// 项目元数据（自动从 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称
    pub mod display {
        pub const FRIENDLY_NAME: &str = "Schema Sync";

        /// 项目详细描述（比 Cargo.toml 中的描述更详细）
        pub const DESCRIPTION_LONG: &str = "对比\"标准库\"与\"待修改库\"两份 mysqldump -d 导出的表结构，\
生成让待修改库与标准库对齐的 ALTER/CREATE/DROP 语句。\
生成的 SQL 输出到标准输出（或 --output 指定的文件），诊断信息输出到标准错误，执行前请人工确认";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// 获取版本信息字符串
pub fn get_version_string() -> String {
    format!(
        "{} v{}",
        metadata::display::FRIENDLY_NAME,
        version_info::CLI_VERSION
    )
}
