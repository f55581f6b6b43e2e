// salvis\apps\sv_cli\src/main.rs

//! SalVis 命令行界面
//!
//! 提供地下水盐度三维可视化的命令行工具。
//!
//! # 架构层级
//!
//! 本模块属于应用层：仅负责参数解析、日志初始化与
//! 子命令分发，数据加载、插值与场景装配全部在库层完成。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// SalVis 地下水盐度三维可视化命令行工具
#[derive(Parser)]
#[command(name = "sv_cli")]
#[command(author = "SalVis Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Groundwater salinity 3D visualization", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成静态分层场景
    Layers(commands::layers::LayersArgs),
    /// 生成深度动画场景
    Animate(commands::animate::AnimateArgs),
    /// 验证输入数据
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Layers(args) => commands::layers::execute(args),
        Commands::Animate(args) => commands::animate::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
