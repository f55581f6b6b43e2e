// crates/sv_io/src/import/survey_csv.rs

//! 盐度测量 CSV 导入
//!
//! 提供从 CSV 文件加载盐度测量与岩层面数据的功能，支持：
//! - 按表头名称定位列
//! - 多种分隔符与注释行
//! - 错误行跳过
//! - 公里到米的坐标换算
//! - 地表以上测点过滤
//!
//! # 列约定
//!
//! 盐度测量表: `xkm`, `ykm`, `zkm`, `dem_m`, `mean_tds`；
//! 岩层面表: `xkm`, `ykm`, `mean_pred`。
//! 坐标列单位为公里，`dem_m` 与 `mean_pred` 已为米。
//!
//! # 使用示例
//!
//! ```ignore
//! use std::path::Path;
//! use sv_io::import::survey_csv::{load_salinity_survey, SurveyCsvConfig};
//!
//! let config = SurveyCsvConfig::default();
//! let survey = load_salinity_survey(Path::new("model-grid-subsample.csv"), &config)?;
//! ```

use std::path::Path;
use tracing::{info, warn};

use sv_foundation::{SvError, SvResult};
use sv_geo::{Point2D, Point3D};

/// 公里转米
const KM_TO_M: f64 = 1e3;

/// 盐度测量表必需列
const SURVEY_COLUMNS: [&str; 5] = ["xkm", "ykm", "zkm", "dem_m", "mean_tds"];

/// 岩层面表必需列
const ROCK_COLUMNS: [&str; 3] = ["xkm", "ykm", "mean_pred"];

// ============================================================================
// 配置
// ============================================================================

/// CSV 加载配置
#[derive(Debug, Clone)]
pub struct SurveyCsvConfig {
    /// 分隔符
    pub delimiter: char,
    /// 注释行前缀（以此开头的行将被跳过）
    pub comment_prefix: Option<char>,
    /// 是否跳过无效行
    pub skip_invalid: bool,
}

impl Default for SurveyCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment_prefix: Some('#'),
            skip_invalid: true,
        }
    }
}

impl SurveyCsvConfig {
    /// 创建制表符分隔的配置
    #[must_use]
    pub fn tab_separated() -> Self {
        Self {
            delimiter: '\t',
            ..Default::default()
        }
    }

    /// 严格模式（无效行即报错）
    #[must_use]
    pub fn strict() -> Self {
        Self {
            skip_invalid: false,
            ..Default::default()
        }
    }
}

// ============================================================================
// 数据模型
// ============================================================================

/// 盐度测量数据
///
/// 三个切片按下标对齐，由构造过程保证。
#[derive(Debug, Clone)]
pub struct SalinitySurvey {
    /// 测点坐标（米）
    pub points: Vec<Point3D>,
    /// 地表高程（米）
    pub dem: Vec<f64>,
    /// 总溶解固体浓度（mg/L）
    pub tds: Vec<f64>,
    /// 地表以上被过滤的测点数
    pub dropped_above_ground: usize,
}

impl SalinitySurvey {
    /// 测点数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 岩层面数据
#[derive(Debug, Clone)]
pub struct RockLayer {
    /// 采样点平面坐标（米）
    pub points: Vec<Point2D>,
    /// 层面高程（米）
    pub elevation: Vec<f64>,
}

impl RockLayer {
    /// 采样点数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ============================================================================
// 加载入口
// ============================================================================

/// 从 CSV 文件加载盐度测量数据
///
/// 坐标由公里换算为米，严格高于地表（`dem_m > zkm·1000` 不成立）
/// 的测点被过滤并记录数量。
///
/// # 错误
///
/// - 文件读取失败
/// - 缺少必需列
/// - 严格模式下遇到无效行
/// - 过滤后无有效数据
pub fn load_salinity_survey(path: &Path, config: &SurveyCsvConfig) -> SvResult<SalinitySurvey> {
    let content = read_file(path)?;
    parse_salinity_survey(&content, config, Some(path))
}

/// 从字符串解析盐度测量数据
pub fn parse_salinity_survey(
    content: &str,
    config: &SurveyCsvConfig,
    path: Option<&Path>,
) -> SvResult<SalinitySurvey> {
    let table = parse_table(content, config, &SURVEY_COLUMNS, path)?;

    let mut points = Vec::with_capacity(table.rows.len());
    let mut dem = Vec::with_capacity(table.rows.len());
    let mut tds = Vec::with_capacity(table.rows.len());
    let mut dropped_above_ground = 0usize;

    for row in &table.rows {
        let [xkm, ykm, zkm, dem_m, mean_tds] = [row[0], row[1], row[2], row[3], row[4]];

        // 地表以上的测点不参与渲染
        if dem_m <= zkm * KM_TO_M {
            dropped_above_ground += 1;
            continue;
        }

        points.push(Point3D::new(xkm * KM_TO_M, ykm * KM_TO_M, zkm * KM_TO_M));
        dem.push(dem_m);
        tds.push(mean_tds);
    }

    if points.is_empty() {
        return Err(SvError::empty_result(format!(
            "{}: 过滤后无有效测点",
            table.source
        )));
    }

    info!(
        "{}: 加载 {} 个测点, 过滤地表以上 {} 个",
        table.source,
        points.len(),
        dropped_above_ground
    );

    Ok(SalinitySurvey {
        points,
        dem,
        tds,
        dropped_above_ground,
    })
}

/// 从 CSV 文件加载岩层面数据
pub fn load_rock_layer(path: &Path, config: &SurveyCsvConfig) -> SvResult<RockLayer> {
    let content = read_file(path)?;
    parse_rock_layer(&content, config, Some(path))
}

/// 从字符串解析岩层面数据
pub fn parse_rock_layer(
    content: &str,
    config: &SurveyCsvConfig,
    path: Option<&Path>,
) -> SvResult<RockLayer> {
    let table = parse_table(content, config, &ROCK_COLUMNS, path)?;

    let mut points = Vec::with_capacity(table.rows.len());
    let mut elevation = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        points.push(Point2D::new(row[0] * KM_TO_M, row[1] * KM_TO_M));
        elevation.push(row[2]);
    }

    if points.is_empty() {
        return Err(SvError::empty_result(format!(
            "{}: 无有效岩层面采样点",
            table.source
        )));
    }

    info!("{}: 加载 {} 个岩层面采样点", table.source, points.len());

    Ok(RockLayer { points, elevation })
}

// ============================================================================
// 内部解析
// ============================================================================

/// 按列名提取后的数值表
struct NumericTable {
    rows: Vec<Vec<f64>>,
    source: String,
}

fn read_file(path: &Path) -> SvResult<String> {
    if !path.exists() {
        return Err(SvError::file_not_found(path));
    }
    std::fs::read_to_string(path).map_err(|e| {
        SvError::io_with_source(format!("Failed to read {}", path.display()), e)
    })
}

/// 解析 CSV 内容，按列名提取必需列
fn parse_table(
    content: &str,
    config: &SurveyCsvConfig,
    columns: &[&str],
    path: Option<&Path>,
) -> SvResult<NumericTable> {
    let source = path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "<string>".to_string());

    let mut lines = content.lines().enumerate();

    // 表头: 第一个非空、非注释行
    let (header_indices, _header_line) = loop {
        let Some((line_num, line)) = lines.next() else {
            return Err(SvError::invalid_input(format!("{source}: 文件为空")));
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(prefix) = config.comment_prefix {
            if trimmed.starts_with(prefix) {
                continue;
            }
        }

        let names: Vec<&str> = trimmed
            .split(config.delimiter)
            .map(str::trim)
            .collect();

        let mut indices = Vec::with_capacity(columns.len());
        for col in columns {
            let index = names.iter().position(|n| n.eq_ignore_ascii_case(col));
            match index {
                Some(i) => indices.push(i),
                None => {
                    return Err(SvError::missing_column(
                        path.map(Path::to_path_buf).unwrap_or_default(),
                        *col,
                    ))
                }
            }
        }
        break (indices, line_num);
    };

    let max_col = header_indices.iter().copied().max().unwrap_or(0);
    let mut rows = Vec::new();
    let mut bad_lines = Vec::new();

    for (line_num, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(prefix) = config.comment_prefix {
            if trimmed.starts_with(prefix) {
                continue;
            }
        }

        let parts: Vec<&str> = line.split(config.delimiter).collect();
        if parts.len() <= max_col {
            if !config.skip_invalid {
                return Err(SvError::parse(
                    path.map(Path::to_path_buf).unwrap_or_default(),
                    line_num + 1,
                    format!(
                        "Insufficient columns: expected at least {}, got {}",
                        max_col + 1,
                        parts.len()
                    ),
                ));
            }
            bad_lines.push(line_num + 1);
            continue;
        }

        let mut row = Vec::with_capacity(header_indices.len());
        let mut valid = true;
        for &i in &header_indices {
            match parts[i].trim().parse::<f64>() {
                Ok(v) if v.is_finite() => row.push(v),
                _ => {
                    valid = false;
                    break;
                }
            }
        }

        if valid {
            rows.push(row);
        } else {
            if !config.skip_invalid {
                return Err(SvError::parse(
                    path.map(Path::to_path_buf).unwrap_or_default(),
                    line_num + 1,
                    "Failed to parse numeric values",
                ));
            }
            bad_lines.push(line_num + 1);
        }
    }

    if !bad_lines.is_empty() {
        let preview: Vec<_> = bad_lines.iter().take(5).collect();
        warn!(
            "{}: 跳过 {} 个无效行 (前几行: {:?}{})",
            source,
            bad_lines.len(),
            preview,
            if bad_lines.len() > 5 { "..." } else { "" }
        );
    }

    Ok(NumericTable { rows, source })
}

// ============================================================================
// 测试
// ============================================================================
