use clap::Parser;
use schema_sync::{Cli, CliApp, Commands, project_info, run_init, setup_logging};
use sync_core::SyncError;
use sync_core::constants::config;
use tracing::{debug, error};

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录
    setup_logging(cli.verbose);
    debug!("{}", project_info::get_version_string());

    // `init` 命令是特例，它不需要预先加载配置
    if let Commands::Init { force } = cli.command {
        let path = cli.config.unwrap_or_else(config::get_config_file_path);
        if let Err(e) = run_init(&path, force) {
            error!("❌ 初始化失败: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut app = match CliApp::new(cli.config.as_deref()) {
        Ok(app) => app,
        Err(SyncError::ConfigNotFound { path }) => {
            error!("❌ 配置文件 '{}' 未找到。", path.display());
            error!("👉 请先运行 'schema-sync init' 命令来创建配置文件。");
            std::process::exit(1);
        }
        Err(e) => {
            error!("❌ 应用初始化失败: {}", e);
            std::process::exit(1);
        }
    };

    // 运行命令
    if let Err(e) = app.run(cli.command) {
        error!("❌ 操作失败: {:#}", e);
        std::process::exit(1);
    }
}
