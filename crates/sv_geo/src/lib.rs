// salvis\crates\sv_geo\src/lib.rs

//! SalVis 几何层
//!
//! 提供项目统一的几何类型与空间查询工具。
//!
//! # 模块
//!
//! - `geometry`: 2D/3D 点类型
//! - `bounds`: 轴对齐边界框
//! - `spatial_index`: 基于 R-tree 的空间索引

pub mod bounds;
pub mod geometry;
pub mod spatial_index;

pub use bounds::{BoundingBox, BoundingBox3D};
pub use geometry::{Point2D, Point3D};
pub use spatial_index::SpatialIndex3D;
