// salvis\apps\sv_cli\src\commands\animate.rs

//! 深度动画场景命令
//!
//! 加载盐度测量与岩层面 CSV，生成水平切片沿高程逐帧
//! 移动的交互式 3D HTML 场景。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use sv_io::{load_rock_layer, load_salinity_survey, HtmlExporter, SurveyCsvConfig};
use sv_plot::{AnimatedSceneBuilder, RockLayerInput, SurveyInput};

/// 动画场景参数
#[derive(Args)]
pub struct AnimateArgs {
    /// 盐度测量 CSV 路径
    #[arg(long, default_value = "model-grid-subsample.csv")]
    pub survey: PathBuf,

    /// 岩层面 1 CSV 路径
    #[arg(long, default_value = "rock-layer-1.csv")]
    pub rock1: PathBuf,

    /// 岩层面 2 CSV 路径
    #[arg(long, default_value = "rock-layer-2.csv")]
    pub rock2: PathBuf,

    /// 输出 HTML 路径
    #[arg(short, long, default_value = "3d-salinity-animated.html")]
    pub output: PathBuf,

    /// 动画网格分辨率（每轴采样点数）
    #[arg(long, default_value_t = 100)]
    pub resolution: usize,

    /// 岩层面网格分辨率
    #[arg(long, default_value_t = 200)]
    pub rock_resolution: usize,

    /// 深度级别数
    #[arg(long, default_value_t = 25)]
    pub levels: usize,

    /// 帧间隔 [毫秒]
    #[arg(long, default_value_t = 500)]
    pub frame_ms: u64,
}

/// 执行动画场景命令
pub fn execute(args: AnimateArgs) -> Result<()> {
    info!("=== SalVis 深度动画场景 ===");
    let start = Instant::now();

    let csv_config = SurveyCsvConfig::default();

    let survey = load_salinity_survey(&args.survey, &csv_config)
        .with_context(|| format!("加载盐度测量数据失败: {}", args.survey.display()))?;
    info!(
        "测点: {} 个 (过滤地表以上 {} 个)",
        survey.len(),
        survey.dropped_above_ground
    );

    let rock1 = load_rock_layer(&args.rock1, &csv_config)
        .with_context(|| format!("加载岩层面失败: {}", args.rock1.display()))?;
    let rock2 = load_rock_layer(&args.rock2, &csv_config)
        .with_context(|| format!("加载岩层面失败: {}", args.rock2.display()))?;
    info!("岩层面: {} / {} 个采样点", rock1.len(), rock2.len());

    info!(
        "插值: {}×{} 网格 × {} 个深度级别",
        args.resolution, args.resolution, args.levels
    );
    let figure = AnimatedSceneBuilder::new()
        .with_survey(SurveyInput {
            points: &survey.points,
            dem: &survey.dem,
            tds: &survey.tds,
        })
        .with_rock_layer(RockLayerInput {
            name: "Rock Layer 1".to_string(),
            points: &rock1.points,
            elevation: &rock1.elevation,
        })
        .with_rock_layer(RockLayerInput {
            name: "Rock Layer 2".to_string(),
            points: &rock2.points,
            elevation: &rock2.elevation,
        })
        .with_resolution(args.resolution)
        .with_rock_resolution(args.rock_resolution)
        .with_levels(args.levels)
        .with_frame_ms(args.frame_ms)
        .build()
        .context("构建动画场景失败")?;

    info!("帧数: {}", figure.n_frames());

    HtmlExporter::new()
        .title("Groundwater salinity (animated)")
        .export(&args.output, &figure)
        .with_context(|| format!("导出 HTML 失败: {}", args.output.display()))?;

    info!(
        "=== 完成: {} ({:.2} s) ===",
        args.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
