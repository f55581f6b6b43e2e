// salvis\crates\sv_plot\src/figure.rs

//! 图形与动画帧
//!
//! `Figure` 是序列化到 HTML 的顶层对象，包含轨迹、布局
//! 与可选的动画帧。序列化失败（理论上仅在数据结构异常时
//! 发生）映射为 `SvError::Serialization`。

use serde::Serialize;
use sv_foundation::{SvError, SvResult};

use crate::layout::Layout;
use crate::trace::Trace;

/// 动画帧
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// 帧名称（滑块与 animate 调用引用）
    pub name: String,
    /// 帧轨迹
    pub data: Vec<Trace>,
    /// 帧布局增量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

/// Plotly 图形
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    /// 轨迹
    pub data: Vec<Trace>,
    /// 布局
    pub layout: Layout,
    /// 动画帧（静态场景为空，不序列化）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}

impl Figure {
    /// 创建静态图形
    #[must_use]
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self {
            data,
            layout,
            frames: Vec::new(),
        }
    }

    /// 创建带动画帧的图形
    #[must_use]
    pub fn with_frames(data: Vec<Trace>, layout: Layout, frames: Vec<Frame>) -> Self {
        Self {
            data,
            layout,
            frames,
        }
    }

    /// 轨迹数量
    #[must_use]
    pub fn n_traces(&self) -> usize {
        self.data.len()
    }

    /// 帧数量
    #[must_use]
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> SvResult<String> {
        serde_json::to_string(self).map_err(|e| SvError::serialization(e.to_string()))
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{AxisData, SurfaceTrace};

    fn dummy_surface() -> Trace {
        SurfaceTrace::new(
            "s",
            AxisData::Vector(vec![0.0, 1.0]),
            AxisData::Vector(vec![0.0, 1.0]),
            vec![vec![0.0, 1.0], vec![1.0, 2.0]],
        )
        .into()
    }

    #[test]
    fn test_static_figure_omits_frames() {
        let fig = Figure::new(vec![dummy_surface()], Layout::default());
        let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        assert!(json.get("frames").is_none());
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_animated_figure_keeps_frames() {
        let frame = Frame {
            name: "-100.0".to_string(),
            data: vec![dummy_surface()],
            layout: None,
        };
        let fig = Figure::with_frames(vec![dummy_surface()], Layout::default(), vec![frame]);
        assert_eq!(fig.n_frames(), 1);

        let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        assert_eq!(json["frames"][0]["name"], "-100.0");
        assert!(json["frames"][0].get("layout").is_none());
    }
}
