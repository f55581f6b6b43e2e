// salvis\crates\sv_plot\src\scene/mod.rs

//! 场景构建器
//!
//! 将测量数据装配为完整的 Plotly 图形：
//!
//! - [`layers`]: 静态分层场景（地表面 + 岩层面 + 测点 + 三向盐度切片）
//! - [`animated`]: 深度动画场景（逐深度水平切片 + 播放控件）
//!
//! 两类场景共享测区布局（米制坐标轴、压缩纵横比、西南视角）。

pub mod animated;
pub mod layers;

pub use animated::AnimatedSceneBuilder;
pub use layers::LayeredSceneBuilder;

use sv_geo::{Point2D, Point3D};

/// 盐度测量数据输入
///
/// 三个切片按下标对齐：`points[i]` 处的地表高程为 `dem[i]`，
/// 实测 TDS 为 `tds[i]`。构建器在 build 时校验长度一致。
#[derive(Debug, Clone, Copy)]
pub struct SurveyInput<'a> {
    /// 测点坐标（米）
    pub points: &'a [Point3D],
    /// 地表高程（米）
    pub dem: &'a [f64],
    /// 总溶解固体浓度（mg/L）
    pub tds: &'a [f64],
}

/// 岩层面数据输入
#[derive(Debug, Clone)]
pub struct RockLayerInput<'a> {
    /// 图例名称
    pub name: String,
    /// 采样点平面坐标（米）
    pub points: &'a [Point2D],
    /// 层面高程（米）
    pub elevation: &'a [f64],
}

/// 算术平均
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
