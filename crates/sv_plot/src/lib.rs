// salvis\crates\sv_plot\src/lib.rs

//! SalVis 绘图层
//!
//! 提供 Plotly 图形规范的类型化子集与两类场景构建器。
//! 图形模型按 Plotly JSON 结构序列化，由 sv_io 嵌入 HTML 输出。
//!
//! # 模块
//!
//! - [`color`]: 色标、色带与盐度配色常量
//! - [`trace`]: Surface 与 Scatter3d 轨迹
//! - [`layout`]: 布局、场景、相机、图例、动画控件
//! - [`figure`]: 图形与动画帧
//! - [`scene`]: 静态分层场景与深度动画场景构建器

pub mod color;
pub mod figure;
pub mod layout;
pub mod scene;
pub mod trace;

pub use color::{ColorBar, ColorScale};
pub use figure::{Figure, Frame};
pub use layout::{Camera, Layout, Legend, Scene};
pub use scene::{AnimatedSceneBuilder, LayeredSceneBuilder, RockLayerInput, SurveyInput};
pub use trace::{AxisData, Marker, Scatter3dTrace, SurfaceTrace, Trace};
