use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;
use sync_core::SyncConfig;
use sync_core::dump::read_dump;
use sync_core::sql_diff::{SyncReport, generate_sync_script};
use tracing::{info, warn};

/// 读取两份表结构、生成同步 SQL 并输出
///
/// SQL 写到标准输出或 `output` 指定的文件，诊断信息只走日志（标准错误）
pub fn run_diff(config: &SyncConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let (standard_path, modify_path) = config.require_paths()?;

    info!("📋 标准库: {}", standard_path.display());
    info!("📋 待修改库: {}", modify_path.display());

    let standard_sql = read_dump(standard_path)?;
    let modify_sql = read_dump(modify_path)?;

    let report = generate_sync_script(&standard_sql, &modify_sql, config)
        .context("生成同步SQL失败")?;

    let content = render_output(&report, standard_path, modify_path);
    match output {
        Some(path) => {
            fs::write(path, &content)
                .with_context(|| format!("写入输出文件失败: {}", path.display()))?;
            info!("✅ 同步SQL已写入: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }

    info!("📊 {}", report.description);
    let review = report.manual_review_count();
    if review > 0 {
        warn!("⚠️  有 {} 项差异需要人工处理，详见上方日志", review);
    }
    Ok(())
}

/// 输出内容：注释头 + 每行一条语句
pub fn render_output(report: &SyncReport, standard_path: &Path, modify_path: &Path) -> String {
    let mut lines = vec![
        "-- 表结构同步SQL".to_string(),
        format!(
            "-- 生成时间: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("-- 标准库: {}", standard_path.display()),
        format!("-- 待修改库: {}", modify_path.display()),
        String::new(),
    ];
    lines.extend(report.statements.iter().cloned());

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const STANDARD: &str = "CREATE TABLE `t1` (\n  `id` int NOT NULL,\n  `name` varchar(32) NOT NULL,\n  UNIQUE KEY `uk_name` (`name`)\n) ENGINE=InnoDB;\n";
    const MODIFY: &str = "CREATE TABLE `t1` (\n  `id` int NOT NULL\n) ENGINE=InnoDB;\n";

    #[test]
    fn test_run_diff_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let standard = dir.path().join("standard.sql");
        let modify = dir.path().join("modify.sql");
        let output = dir.path().join("sync.sql");
        fs::write(&standard, STANDARD).unwrap();
        fs::write(&modify, MODIFY).unwrap();

        let config = SyncConfig {
            standard_path: Some(standard),
            modify_path: Some(modify),
            ..SyncConfig::default()
        };
        run_diff(&config, Some(&output)).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let statements: Vec<&str> = content
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with("--"))
            .collect();
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE t1 ADD name varchar(32) NOT NULL;",
                "CREATE UNIQUE INDEX uk_name ON t1 (name);",
            ]
        );
    }

    #[test]
    fn test_run_diff_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig {
            standard_path: Some(dir.path().join("absent.sql")),
            modify_path: Some(dir.path().join("absent.sql")),
            ..SyncConfig::default()
        };
        let err = run_diff(&config, None).unwrap_err();
        assert!(err.to_string().contains("absent.sql"));
    }

    #[test]
    fn test_run_diff_requires_paths() {
        let err = run_diff(&SyncConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains("standard_path"));
    }

    #[test]
    fn test_render_output_header() {
        let report = SyncReport {
            statements: vec!["ALTER TABLE t1 DROP COLUMN a;".to_string()],
            ..SyncReport::default()
        };
        let content = render_output(
            &report,
            &PathBuf::from("standard.sql"),
            &PathBuf::from("modify.sql"),
        );
        assert!(content.starts_with("-- 表结构同步SQL\n"));
        assert!(content.contains("-- 标准库: standard.sql"));
        assert!(content.ends_with("ALTER TABLE t1 DROP COLUMN a;\n"));
    }
}
