// salvis\crates\sv_plot\src/layout.rs

//! Plotly 布局类型
//!
//! 覆盖 3D 场景布局、相机、图例、标注与动画控件
//! （播放/暂停按钮、深度滑块）。字段命名与 Plotly JSON 一致。

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// 字体与标题
// ============================================================================

/// 字体
#[derive(Debug, Clone, Serialize)]
pub struct Font {
    /// 字号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// 颜色
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    /// 指定字号与颜色
    #[must_use]
    pub fn sized(size: u32, color: &str) -> Self {
        Self {
            size: Some(size),
            color: Some(color.to_string()),
        }
    }
}

/// 图标题
#[derive(Debug, Clone, Serialize)]
pub struct Title {
    /// 标题文字（支持 HTML 标记）
    pub text: String,
    /// 水平位置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// 垂直位置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// 字体
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// 页边距
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Margin {
    /// 左
    pub l: u32,
    /// 右
    pub r: u32,
    /// 下
    pub b: u32,
    /// 上
    pub t: u32,
}

// ============================================================================
// 3D 场景
// ============================================================================

/// 场景坐标轴
#[derive(Debug, Clone, Serialize)]
pub struct SceneAxis {
    /// 轴标题
    pub title: String,
    /// 轴颜色
    pub color: String,
    /// 是否显示背景面
    pub showbackground: bool,
    /// 背景面颜色
    pub backgroundcolor: String,
}

impl SceneAxis {
    /// 灰背景轴（本项目统一样式）
    #[must_use]
    pub fn gray(title: &str) -> Self {
        Self {
            title: title.to_string(),
            color: "black".to_string(),
            showbackground: true,
            backgroundcolor: "gray".to_string(),
        }
    }
}

/// 三元坐标
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coord3 {
    /// X 分量
    pub x: f64,
    /// Y 分量
    pub y: f64,
    /// Z 分量
    pub z: f64,
}

impl Coord3 {
    /// 创建三元坐标
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// 相机
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Camera {
    /// 上方向
    pub up: Coord3,
    /// 注视中心
    pub center: Coord3,
    /// 视点位置
    pub eye: Coord3,
}

impl Default for Camera {
    /// 测区默认视角：西南方向俯视
    fn default() -> Self {
        Self {
            up: Coord3::new(0.0, 0.0, 1.0),
            center: Coord3::new(0.0, 0.0, -0.2),
            eye: Coord3::new(-1.0, -1.3, 1.0),
        }
    }
}

/// 3D 场景
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    /// X 轴
    pub xaxis: SceneAxis,
    /// Y 轴
    pub yaxis: SceneAxis,
    /// Z 轴
    pub zaxis: SceneAxis,
    /// 纵横比
    pub aspectratio: Coord3,
    /// 相机
    pub camera: Camera,
}

impl Scene {
    /// 测区标准场景
    ///
    /// 轴标题为米制东/北/高程，垂向压缩到 0.25 纵横比。
    #[must_use]
    pub fn survey() -> Self {
        Self {
            xaxis: SceneAxis::gray("Easting (m)"),
            yaxis: SceneAxis::gray("Northing (m)"),
            zaxis: SceneAxis::gray("Elevation (m)"),
            aspectratio: Coord3::new(1.0, 1.0, 0.25),
            camera: Camera::default(),
        }
    }
}

// ============================================================================
// 图例与标注
// ============================================================================

/// 图例标题
#[derive(Debug, Clone, Serialize)]
pub struct LegendTitle {
    /// 标题文字
    pub text: String,
}

/// 图例
#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    /// 水平位置
    pub x: f64,
    /// 垂直位置
    pub y: f64,
    /// 字体
    pub font: Font,
    /// 背景色
    pub bgcolor: String,
    /// 边框色
    pub bordercolor: String,
    /// 边框宽度
    pub borderwidth: u32,
    /// 标题
    pub title: LegendTitle,
}

impl Legend {
    /// 图层说明图例（本项目统一样式）
    #[must_use]
    pub fn explanation() -> Self {
        Self {
            x: 0.0,
            y: 0.8,
            font: Font::sized(13, "black"),
            bgcolor: "rgb(230,230,230)".to_string(),
            bordercolor: "black".to_string(),
            borderwidth: 2,
            title: LegendTitle {
                text: "<b> Explanation </b><br> (click each to toggle) <br>".to_string(),
            },
        }
    }
}

/// 标注
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// 标注文字（支持 HTML 标记）
    pub text: String,
    /// 水平位置
    pub x: f64,
    /// 垂直位置
    pub y: f64,
    /// 水平参考系
    pub xref: &'static str,
    /// 垂直参考系
    pub yref: &'static str,
    /// 是否绘制箭头
    pub showarrow: bool,
    /// 字体
    pub font: Font,
    /// 对齐方式
    pub align: &'static str,
    /// 背景色
    pub bgcolor: String,
    /// 边框色
    pub bordercolor: String,
    /// 边框宽度
    pub borderwidth: u32,
}

impl Annotation {
    /// 深度标注（动画场景顶部）
    #[must_use]
    pub fn depth_label(z: f64) -> Self {
        Self {
            text: format!("<b>Z = {z:.1} m</b>"),
            x: 0.5,
            y: 1.08,
            xref: "paper",
            yref: "paper",
            showarrow: false,
            font: Font::sized(24, "black"),
            align: "center",
            bgcolor: "rgba(255,255,255,0.7)".to_string(),
            bordercolor: "black".to_string(),
            borderwidth: 1,
        }
    }
}

// ============================================================================
// 动画控件
// ============================================================================

/// 控件按钮
#[derive(Debug, Clone, Serialize)]
pub struct Button {
    /// 按钮文字
    pub label: String,
    /// 触发方法
    pub method: &'static str,
    /// 方法参数（Plotly animate 参数结构）
    pub args: Vec<Value>,
}

/// 控件组
#[derive(Debug, Clone, Serialize)]
pub struct UpdateMenu {
    /// 控件类型
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// 是否高亮活动按钮
    pub showactive: bool,
    /// 水平位置
    pub x: f64,
    /// 垂直位置
    pub y: f64,
    /// 按钮列表
    pub buttons: Vec<Button>,
}

impl UpdateMenu {
    /// 播放/暂停按钮组
    #[must_use]
    pub fn play_pause(frame_ms: u64) -> Self {
        Self {
            kind: "buttons",
            showactive: false,
            x: 0.05,
            y: 0.0,
            buttons: vec![
                Button {
                    label: "▶ Play".to_string(),
                    method: "animate",
                    args: vec![
                        Value::Null,
                        serde_json::json!({
                            "frame": {"duration": frame_ms, "redraw": true},
                            "fromcurrent": true,
                            "transition": {"duration": 0}
                        }),
                    ],
                },
                Button {
                    label: "⏸ Pause".to_string(),
                    method: "animate",
                    args: vec![
                        serde_json::json!([null]),
                        serde_json::json!({
                            "mode": "immediate",
                            "frame": {"duration": 0, "redraw": false},
                            "transition": {"duration": 0}
                        }),
                    ],
                },
            ],
        }
    }
}

/// 滑块步进
#[derive(Debug, Clone, Serialize)]
pub struct SliderStep {
    /// 触发方法
    pub method: &'static str,
    /// 方法参数
    pub args: Vec<Value>,
    /// 步进标签
    pub label: String,
}

impl SliderStep {
    /// 跳转到指定帧
    #[must_use]
    pub fn goto_frame(frame_name: &str, label: impl Into<String>) -> Self {
        Self {
            method: "animate",
            args: vec![
                serde_json::json!([frame_name]),
                serde_json::json!({
                    "mode": "immediate",
                    "frame": {"duration": 0, "redraw": true},
                    "transition": {"duration": 0}
                }),
            ],
            label: label.into(),
        }
    }
}

/// 滑块当前值显示
#[derive(Debug, Clone, Serialize)]
pub struct CurrentValue {
    /// 前缀文字
    pub prefix: String,
    /// 字体
    pub font: Font,
}

/// 滑块内边距
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pad {
    /// 底部内边距
    pub b: u32,
}

/// 滑块
#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    /// 步进列表
    pub steps: Vec<SliderStep>,
    /// 水平位置
    pub x: f64,
    /// 垂直位置
    pub y: f64,
    /// 长度比例
    pub len: f64,
    /// 当前值显示
    pub currentvalue: CurrentValue,
    /// 内边距
    pub pad: Pad,
}

impl Slider {
    /// 深度滑块
    ///
    /// 每个深度级别一个步进，标签为 "{z:.1} m"。
    #[must_use]
    pub fn depth(levels: &[f64]) -> Self {
        Self {
            steps: levels
                .iter()
                .map(|&z| SliderStep::goto_frame(&format!("{z:.1}"), format!("{z:.1} m")))
                .collect(),
            x: 0.1,
            y: 0.0,
            len: 0.8,
            currentvalue: CurrentValue {
                prefix: "Z-slice: ".to_string(),
                font: Font {
                    size: Some(14),
                    color: None,
                },
            },
            pad: Pad { b: 10 },
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// 图形布局
#[derive(Debug, Clone, Serialize, Default)]
pub struct Layout {
    /// 图标题
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// 页边距
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// 3D 场景
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    /// 图例
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    /// 标注
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
    /// 动画控件
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updatemenus: Option<Vec<UpdateMenu>>,
    /// 滑块
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sliders: Option<Vec<Slider>>,
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_survey_axes() {
        let scene = Scene::survey();
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["xaxis"]["title"], "Easting (m)");
        assert_eq!(json["zaxis"]["backgroundcolor"], "gray");
        assert_eq!(json["aspectratio"]["z"], 0.25);
        assert_eq!(json["camera"]["eye"]["y"], -1.3);
    }

    #[test]
    fn test_play_pause_buttons() {
        let menu = UpdateMenu::play_pause(500);
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["type"], "buttons");
        assert_eq!(json["buttons"][0]["method"], "animate");
        assert!(json["buttons"][0]["args"][0].is_null());
        assert_eq!(json["buttons"][0]["args"][1]["frame"]["duration"], 500);
        assert_eq!(json["buttons"][1]["args"][1]["mode"], "immediate");
    }

    #[test]
    fn test_depth_slider_labels() {
        let slider = Slider::depth(&[-400.0, -200.0, 0.0]);
        assert_eq!(slider.steps.len(), 3);
        assert_eq!(slider.steps[0].label, "-400.0 m");
        let json = serde_json::to_value(&slider).unwrap();
        assert_eq!(json["steps"][1]["args"][0][0], "-200.0");
        assert_eq!(json["currentvalue"]["prefix"], "Z-slice: ");
    }

    #[test]
    fn test_depth_annotation() {
        let ann = Annotation::depth_label(-250.0);
        assert_eq!(ann.text, "<b>Z = -250.0 m</b>");
        assert_eq!(ann.xref, "paper");
    }

    #[test]
    fn test_empty_layout_serializes_empty() {
        let layout = Layout::default();
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
