// salvis\crates\sv_plot\src/color.rs

//! 色标与色带
//!
//! 定义 Plotly 色标（命名色标或显式色停点）与色带配置，
//! 以及盐度渲染共用的对数刻度常量。
//!
//! 盐度以 log10(TDS) 上色，色带刻度固定在 400 / 1000 / 5000 /
//! 10000 mg/L 的对数位置，刻度文字显示原始浓度。

use serde::Serialize;

/// 盐度色带刻度值 [mg/L]
pub const SALINITY_TICKS_MG_L: [f64; 4] = [400.0, 1000.0, 5000.0, 10000.0];

/// 盐度上色下限（log10 空间）
#[must_use]
pub fn salinity_cmin() -> f64 {
    SALINITY_TICKS_MG_L[0].log10()
}

/// 盐度上色上限（log10 空间）
#[must_use]
pub fn salinity_cmax() -> f64 {
    SALINITY_TICKS_MG_L[3].log10()
}

// ============================================================================
// ColorScale
// ============================================================================

/// Plotly 色标
///
/// 命名色标直接序列化为字符串；显式色停点序列化为
/// `[[位置, 颜色], ...]` 列表。反转（如 Python 端的 `RdYlBu_r`）
/// 通过轨迹上的 `reversescale` 标志表达。
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ColorScale {
    /// 命名色标
    Named(&'static str),
    /// 显式色停点
    Stops(Vec<(f64, String)>),
}

impl ColorScale {
    /// 地形色标（地表面）
    pub const EARTH: Self = Self::Named("Earth");
    /// 灰度色标
    pub const GREYS: Self = Self::Named("Greys");
    /// 蓝色色标
    pub const BLUES: Self = Self::Named("Blues");
    /// 盐度色标（配合 reversescale 使用）
    pub const RD_YL_BU: Self = Self::Named("RdYlBu");

    /// 纯色色标（两端同色），用于单色岩层面
    #[must_use]
    pub fn solid(color: &str) -> Self {
        Self::Stops(vec![(0.0, color.to_string()), (1.0, color.to_string())])
    }
}

// ============================================================================
// ColorBar
// ============================================================================

/// 色带标题
#[derive(Debug, Clone, Serialize)]
pub struct ColorBarTitle {
    /// 标题文字
    pub text: String,
    /// 标题位置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
}

/// 色带配置
#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    /// 标题
    pub title: ColorBarTitle,
    /// 水平位置（paper 坐标）
    pub x: f64,
    /// 长度比例
    pub len: f64,
    /// 刻度线方向
    pub ticks: &'static str,
    /// 刻度位置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    /// 刻度文字
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
}

impl ColorBar {
    /// 盐度色带
    ///
    /// 刻度置于固定浓度的 log10 位置，文字显示 mg/L 原值。
    #[must_use]
    pub fn salinity(x: f64) -> Self {
        Self {
            title: ColorBarTitle {
                text: "Salinity (mg/L)".to_string(),
                side: Some("right"),
            },
            x,
            len: 0.5,
            ticks: "outside",
            tickvals: Some(SALINITY_TICKS_MG_L.iter().map(|v| v.log10()).collect()),
            ticktext: Some(
                SALINITY_TICKS_MG_L
                    .iter()
                    .map(|v| format!("{v:.0}"))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
