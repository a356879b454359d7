use crate::cli::{Commands, DiffArgs};
use crate::commands;
use std::path::Path;
use sync_core::{SyncConfig, error::Result};
use tracing::debug;

pub struct CliApp {
    pub config: SyncConfig,
}

impl CliApp {
    /// 加载配置：指定了路径则必须存在，否则按默认顺序查找
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => SyncConfig::load_from_file(path)?,
            None => SyncConfig::find_and_load_config()?,
        };
        debug!("当前配置: {:?}", config);
        Ok(Self { config })
    }

    /// 命令行参数覆盖配置文件中的同名项
    pub fn apply_diff_args(&mut self, args: &DiffArgs) {
        if let Some(standard) = &args.standard {
            self.config.standard_path = Some(standard.clone());
        }
        if let Some(modify) = &args.modify {
            self.config.modify_path = Some(modify.clone());
        }
        if let Some(case_sensitivity) = args.case_sensitivity() {
            self.config.case_sensitivity = case_sensitivity;
        }
        if let Some(scope) = args.scope {
            self.config.scope = scope;
        }
        if args.render_updates {
            self.config.render_updates = true;
        }
    }

    /// 运行应用命令
    pub fn run(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Diff(args) => {
                self.apply_diff_args(&args);
                commands::run_diff(&self.config, args.output.as_deref())
            }
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use sync_core::{CaseSensitivity, DiffScope};

    #[test]
    fn test_diff_args_override_config() {
        let mut app = CliApp {
            config: SyncConfig {
                standard_path: Some(PathBuf::from("from_file.sql")),
                modify_path: Some(PathBuf::from("prod.sql")),
                ..SyncConfig::default()
            },
        };

        app.apply_diff_args(&DiffArgs {
            standard: Some(PathBuf::from("from_cli.sql")),
            case_sensitive: true,
            scope: Some(DiffScope::Indexes),
            ..DiffArgs::default()
        });

        assert_eq!(app.config.standard_path, Some(PathBuf::from("from_cli.sql")));
        assert_eq!(app.config.modify_path, Some(PathBuf::from("prod.sql")));
        assert_eq!(app.config.case_sensitivity, CaseSensitivity::Sensitive);
        assert_eq!(app.config.scope, DiffScope::Indexes);
        assert!(!app.config.render_updates);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = CliApp::new(Some(&dir.path().join("missing.toml")));
        assert!(matches!(
            result,
            Err(sync_core::SyncError::ConfigNotFound { .. })
        ));
    }
}
