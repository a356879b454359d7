use std::path::Path;
use sync_core::{SyncConfig, error::Result};
use tracing::{info, warn};

/// 生成默认配置文件
pub fn run_init(path: &Path, force: bool) -> Result<()> {
    info!("🛠️  Schema Sync 初始化");

    if path.exists() && !force {
        warn!("⚠️  配置文件已存在: {}", path.display());
        info!("如果要重新生成，请使用 --force 参数");
        info!("示例: schema-sync init --force");
        return Ok(());
    }

    SyncConfig::default().save_to_file(path)?;
    info!("   ✅ 创建配置文件: {}", path.display());
    info!("   👉 填写 standard_path 与 modify_path 后运行: schema-sync diff");
    Ok(())
}
