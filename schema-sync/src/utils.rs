/// # Schema Sync 日志说明
///
/// 1. **库代码只使用 `tracing` 宏**：`info!()`, `warn!()`, `error!()`, `debug!()`
/// 2. **应用入口控制日志配置**：在 `main.rs` 中调用 `setup_logging()`
/// 3. **SQL 与日志分离**：生成的 SQL 写到标准输出，日志一律写到标准错误，
///    因此 `schema-sync diff > sync.sql` 得到的文件里只有 SQL
///
/// ### 环境变量
/// - `RUST_LOG`：标准的 Rust 日志级别控制（如 `debug`, `info`, `warn`, `error`）
/// - `SCHEMA_SYNC_LOG_FILE`：日志文件路径，设置后日志输出到文件而非终端
///
/// ```bash
/// # 详细日志
/// schema-sync -v diff --standard std.sql --modify prod.sql
///
/// # 只看某个模块的调试日志
/// RUST_LOG=sync_core::sql_diff=debug schema-sync diff
/// ```
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // 根据verbose参数和环境变量确定日志级别
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = std::env::var("SCHEMA_SYNC_LOG_FILE").ok().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| eprintln!("无法打开日志文件 {path}: {e}，改为输出到终端"))
            .ok()
    });

    match log_file {
        // 输出到文件 - 使用详细格式便于调试
        Some(file) => fmt()
            .with_env_filter(env_filter)
            .with_writer(file)
            .with_target(true)
            .with_line_number(true)
            .with_ansi(false)
            .init(),
        // 输出到终端 - 使用简洁格式
        None => fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_line_number(false)
            .without_time()
            .compact()
            .init(),
    }
}
