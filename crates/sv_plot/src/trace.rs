// salvis\crates\sv_plot\src/trace.rs

//! Plotly 轨迹类型
//!
//! 覆盖本项目用到的两类 3D 轨迹：曲面（Surface）与
//! 散点（Scatter3d）。字段命名与 Plotly JSON 规范一致，
//! 未设置的可选字段不参与序列化。
//!
//! 网格中的 NaN 经 serde_json 序列化为 null，Plotly 视为缺测。

use serde::Serialize;

use crate::color::{ColorBar, ColorScale};
use sv_interp::Grid2D;

// ============================================================================
// 轨迹数据
// ============================================================================

/// 曲面轴数据
///
/// Plotly 的 Surface 轨迹允许 x/y 为 1D 向量（规则网格）
/// 或 2D 矩阵（任意参数化曲面，纵剖面使用）。
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AxisData {
    /// 1D 向量
    Vector(Vec<f64>),
    /// 2D 矩阵
    Matrix(Vec<Vec<f64>>),
}

impl AxisData {
    /// 由网格行优先导出 2D 矩阵
    #[must_use]
    pub fn from_grid(grid: &Grid2D) -> Self {
        Self::Matrix(grid.to_rows())
    }

    /// 常值矩阵
    #[must_use]
    pub fn constant(nrows: usize, ncols: usize, value: f64) -> Self {
        Self::Matrix(vec![vec![value; ncols]; nrows])
    }
}

// ============================================================================
// Surface
// ============================================================================

/// 曲面轨迹
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceTrace {
    /// 轨迹类型标记, 恒为 "surface"
    #[serde(rename = "type")]
    kind: &'static str,
    /// X 数据
    pub x: AxisData,
    /// Y 数据
    pub y: AxisData,
    /// Z 矩阵
    pub z: Vec<Vec<f64>>,
    /// 上色矩阵（缺省时按 z 上色）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surfacecolor: Option<Vec<Vec<f64>>>,
    /// 色标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    /// 反转色标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversescale: Option<bool>,
    /// 上色下限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmin: Option<f64>,
    /// 上色上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmax: Option<f64>,
    /// 不透明度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// 是否显示色带
    pub showscale: bool,
    /// 是否出现在图例中
    pub showlegend: bool,
    /// 轨迹名称
    pub name: String,
    /// 色带配置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

impl SurfaceTrace {
    /// 创建曲面轨迹
    ///
    /// 默认不显示色带、显示图例、不透明。
    #[must_use]
    pub fn new(name: impl Into<String>, x: AxisData, y: AxisData, z: Vec<Vec<f64>>) -> Self {
        Self {
            kind: "surface",
            x,
            y,
            z,
            surfacecolor: None,
            colorscale: None,
            reversescale: None,
            cmin: None,
            cmax: None,
            opacity: None,
            showscale: false,
            showlegend: true,
            name: name.into(),
            colorbar: None,
        }
    }

    /// 设置色标
    #[must_use]
    pub fn with_colorscale(mut self, scale: ColorScale) -> Self {
        self.colorscale = Some(scale);
        self
    }

    /// 设置反转色标
    #[must_use]
    pub fn with_reversescale(mut self) -> Self {
        self.reversescale = Some(true);
        self
    }

    /// 设置上色矩阵
    #[must_use]
    pub fn with_surfacecolor(mut self, color: Vec<Vec<f64>>) -> Self {
        self.surfacecolor = Some(color);
        self
    }

    /// 设置上色范围
    #[must_use]
    pub fn with_color_range(mut self, cmin: f64, cmax: f64) -> Self {
        self.cmin = Some(cmin);
        self.cmax = Some(cmax);
        self
    }

    /// 设置不透明度
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// 显示色带
    #[must_use]
    pub fn with_colorbar(mut self, colorbar: ColorBar) -> Self {
        self.showscale = true;
        self.colorbar = Some(colorbar);
        self
    }

    /// 设置图例可见性
    #[must_use]
    pub fn with_showlegend(mut self, show: bool) -> Self {
        self.showlegend = show;
        self
    }
}

// ============================================================================
// Scatter3d
// ============================================================================

/// 散点标记样式
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    /// 标记尺寸
    pub size: f64,
    /// 标记符号
    pub symbol: &'static str,
    /// 色标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    /// 反转色标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversescale: Option<bool>,
    /// 每点颜色值
    pub color: Vec<f64>,
    /// 是否显示色带
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    /// 色带配置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

/// 3D 散点轨迹
#[derive(Debug, Clone, Serialize)]
pub struct Scatter3dTrace {
    /// 轨迹类型标记, 恒为 "scatter3d"
    #[serde(rename = "type")]
    kind: &'static str,
    /// X 坐标
    pub x: Vec<f64>,
    /// Y 坐标
    pub y: Vec<f64>,
    /// Z 坐标
    pub z: Vec<f64>,
    /// 绘制模式
    pub mode: &'static str,
    /// 轨迹名称
    pub name: String,
    /// 是否出现在图例中
    pub showlegend: bool,
    /// 标记样式
    pub marker: Marker,
    /// 悬浮提示模板
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    /// 悬浮提示附加数据（每点一行）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<f64>>>,
}

impl Scatter3dTrace {
    /// 创建标记散点轨迹
    #[must_use]
    pub fn markers(
        name: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        marker: Marker,
    ) -> Self {
        Self {
            kind: "scatter3d",
            x,
            y,
            z,
            mode: "markers",
            name: name.into(),
            showlegend: true,
            marker,
            hovertemplate: None,
            customdata: None,
        }
    }

    /// 设置悬浮提示模板与附加数据
    #[must_use]
    pub fn with_hover(mut self, template: impl Into<String>, customdata: Vec<Vec<f64>>) -> Self {
        self.hovertemplate = Some(template.into());
        self.customdata = Some(customdata);
        self
    }
}

// ============================================================================
// Trace
// ============================================================================

/// 轨迹（任一类型）
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Trace {
    /// 曲面
    Surface(SurfaceTrace),
    /// 3D 散点
    Scatter3d(Scatter3dTrace),
}

impl From<SurfaceTrace> for Trace {
    fn from(t: SurfaceTrace) -> Self {
        Self::Surface(t)
    }
}

impl From<Scatter3dTrace> for Trace {
    fn from(t: Scatter3dTrace) -> Self {
        Self::Scatter3d(t)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_type_field() {
        let trace = SurfaceTrace::new(
            "Land surface",
            AxisData::Vector(vec![0.0, 1.0]),
            AxisData::Vector(vec![0.0, 1.0]),
            vec![vec![0.0, 1.0], vec![1.0, 2.0]],
        );
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "surface");
        assert_eq!(json["name"], "Land surface");
        assert_eq!(json["showlegend"], true);
        // 未设置的可选字段不序列化
        assert!(json.get("opacity").is_none());
        assert!(json.get("surfacecolor").is_none());
    }

    #[test]
    fn test_surface_nan_serializes_as_null() {
        let trace = SurfaceTrace::new(
            "s",
            AxisData::Vector(vec![0.0, 1.0]),
            AxisData::Vector(vec![0.0]),
            vec![vec![f64::NAN, 2.0]],
        );
        let json = serde_json::to_value(&trace).unwrap();
        assert!(json["z"][0][0].is_null());
        assert_eq!(json["z"][0][1], 2.0);
    }

    #[test]
    fn test_scatter_markers() {
        let marker = Marker {
            size: 3.0,
            symbol: "square",
            colorscale: Some(ColorScale::RD_YL_BU),
            reversescale: Some(true),
            color: vec![2.6, 3.0],
            showscale: Some(false),
            colorbar: None,
        };
        let trace = Scatter3dTrace::markers(
            "Groundwater salinity",
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![-10.0, -20.0],
            marker,
        )
        .with_hover("TDS: %{customdata[0]:.0f}<extra></extra>", vec![vec![400.0], vec![1000.0]]);

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter3d");
        assert_eq!(json["mode"], "markers");
        assert_eq!(json["marker"]["symbol"], "square");
        assert_eq!(json["marker"]["reversescale"], true);
        assert_eq!(json["customdata"][1][0], 1000.0);
    }

    #[test]
    fn test_trace_untagged() {
        let trace: Trace = SurfaceTrace::new(
            "s",
            AxisData::Vector(vec![0.0]),
            AxisData::Vector(vec![0.0]),
            vec![vec![1.0]],
        )
        .into();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "surface");
    }
}
