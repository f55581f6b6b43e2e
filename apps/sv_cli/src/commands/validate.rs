// salvis\apps\sv_cli\src\commands\validate.rs

//! 输入数据验证命令
//!
//! 检查盐度测量与岩层面 CSV 的格式、必需列与取值范围。

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{error, warn};

use sv_io::{load_rock_layer, load_salinity_survey, SurveyCsvConfig};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 盐度测量 CSV 路径
    #[arg(long)]
    pub survey: Option<PathBuf>,

    /// 岩层面 CSV 路径（可多次指定）
    #[arg(long = "rock")]
    pub rocks: Vec<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    println!("=== SalVis 数据验证 ===");

    let mut result = ValidationResult::default();

    if let Some(survey_path) = &args.survey {
        validate_survey(survey_path, &mut result);
    }

    for rock_path in &args.rocks {
        validate_rock(rock_path, &mut result);
    }

    // 如果没有指定任何文件
    if args.survey.is_none() && args.rocks.is_empty() {
        println!("用法: sv_cli validate --survey <测量CSV> [--rock <岩层CSV>]...");
        return Ok(());
    }

    print_validation_result(&result, args.strict)
}

fn validate_survey(path: &PathBuf, result: &mut ValidationResult) {
    println!("\n检查盐度测量文件: {}", path.display());

    let config = SurveyCsvConfig::default();
    let survey = match load_salinity_survey(path, &config) {
        Ok(s) => s,
        Err(e) => {
            result.add_error(format!("{}: {}", path.display(), e));
            return;
        }
    };

    println!("  ✓ 有效测点 {} 个", survey.len());

    // 地表以上测点比例
    let total = survey.len() + survey.dropped_above_ground;
    if survey.dropped_above_ground > 0 {
        println!("  · 过滤地表以上测点 {} 个", survey.dropped_above_ground);
        if survey.dropped_above_ground * 2 > total {
            result.add_warning(format!(
                "{}: 超过半数测点位于地表以上 ({}/{})",
                path.display(),
                survey.dropped_above_ground,
                total
            ));
        }
    }

    // TDS 必须为正值（对数上色）
    let non_positive = survey.tds.iter().filter(|&&v| v <= 0.0).count();
    if non_positive > 0 {
        result.add_warning(format!(
            "{}: {} 个非正 TDS 值, 对数上色时将显示为缺测",
            path.display(),
            non_positive
        ));
    }

    if let (Some(min), Some(max)) = (
        survey.tds.iter().copied().reduce(f64::min),
        survey.tds.iter().copied().reduce(f64::max),
    ) {
        println!("  · TDS 范围: {min:.0} ~ {max:.0} mg/L");
    }

    let z_min = survey.points.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
    let z_max = survey
        .points
        .iter()
        .map(|p| p.z)
        .fold(f64::NEG_INFINITY, f64::max);
    println!("  · 高程范围: {z_min:.0} ~ {z_max:.0} m");

    // 切片插值至少需要一定数量的测点
    if survey.len() < 10 {
        result.add_warning(format!(
            "{}: 测点过少 ({}), 插值结果可能不可靠",
            path.display(),
            survey.len()
        ));
    }
}

fn validate_rock(path: &PathBuf, result: &mut ValidationResult) {
    println!("\n检查岩层面文件: {}", path.display());

    let config = SurveyCsvConfig::default();
    let layer = match load_rock_layer(path, &config) {
        Ok(l) => l,
        Err(e) => {
            result.add_error(format!("{}: {}", path.display(), e));
            return;
        }
    };

    println!("  ✓ 采样点 {} 个", layer.len());

    if layer.len() < 3 {
        result.add_error(format!(
            "{}: 采样点不足 3 个, 无法三角剖分",
            path.display()
        ));
    }

    if let (Some(min), Some(max)) = (
        layer.elevation.iter().copied().reduce(f64::min),
        layer.elevation.iter().copied().reduce(f64::max),
    ) {
        println!("  · 层面高程范围: {min:.0} ~ {max:.0} m");
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
