// salvis\crates\sv_interp\src/lib.rs

//! SalVis 插值层
//!
//! 提供采样网格与散点数据插值功能。
//!
//! # 模块
//!
//! - [`grid`]: 等距采样轴与行优先二维网格
//! - [`delaunay`]: Bowyer-Watson 三角剖分
//! - [`triangular`]: 基于三角剖分的 2D 线性插值
//! - [`volume`]: 局部线性 3D 散点插值
//!
//! # 选择指南
//!
//! | 方法 | 维度 | 凸包外行为 | 适用场景 |
//! |------|------|-----------|---------|
//! | Triangular | 2D | NaN | 地表面、岩层面网格化 |
//! | Volume | 3D | NaN | 盐度体切片 |

pub mod delaunay;
pub mod grid;
pub mod triangular;
pub mod volume;

pub use delaunay::Triangulation;
pub use grid::{Grid2D, GridAxis};
pub use triangular::TriangularInterpolator;
pub use volume::{VolumeConfig, VolumeInterpolator};
