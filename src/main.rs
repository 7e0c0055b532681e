use anyhow::Result;
use clap::Parser;
use tracing::error;

use fetch_gradecard::cli::Cli;
use fetch_gradecard::config::Config;
use fetch_gradecard::logger;
use fetch_gradecard::orchestrator::App;

#[tokio::main]
async fn main() {
    // 初始化日志
    logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("❌ 运行失败: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 加载配置
    let config = Config::load().await?;

    // 初始化并运行应用
    App::initialize(config, cli.roll_number, cli.path)
        .await?
        .run()
        .await?;

    Ok(())
}
