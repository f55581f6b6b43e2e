// salvis\crates\sv_geo\src/bounds.rs

//! 轴对齐边界框
//!
//! 提供 2D 和 3D 边界框，用于描述测区范围和构建采样网格。

use crate::geometry::{Point2D, Point3D};

// ============================================================================
// BoundingBox - 2D 边界框
// ============================================================================

/// 2D 边界框
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// 最小 x
    pub min_x: f64,
    /// 最小 y
    pub min_y: f64,
    /// 最大 x
    pub max_x: f64,
    /// 最大 y
    pub max_y: f64,
}

impl BoundingBox {
    /// 创建新的边界框
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// 从点集构建
    ///
    /// 点集为空时返回 None。
    #[must_use]
    pub fn from_points(points: &[Point2D]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    /// 检查点是否在边界框内
    #[must_use]
    pub fn contains_point(&self, point: &Point2D) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// 计算宽度
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// 计算高度
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// 计算中心点
    #[must_use]
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// 扩展边界框
    #[must_use]
    pub fn expand(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

// ============================================================================
// BoundingBox3D - 3D 边界框
// ============================================================================

/// 3D 边界框
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3D {
    /// 最小角点
    pub min: Point3D,
    /// 最大角点
    pub max: Point3D,
}

impl BoundingBox3D {
    /// 从两个角点创建
    #[must_use]
    pub fn new(a: Point3D, b: Point3D) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// 从点集构建
    ///
    /// 点集为空时返回 None。
    #[must_use]
    pub fn from_points(points: &[Point3D]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    /// 检查点是否在边界框内
    #[must_use]
    pub fn contains_point(&self, p: &Point3D) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// X 方向范围
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Y 方向范围
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Z 方向范围
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// 计算中心点
    #[must_use]
    pub fn center(&self) -> Point3D {
        Point3D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// 各轴范围，零范围轴返回 1.0
    ///
    /// 用于各向异性归一化：测区水平范围通常比垂向大三个数量级。
    #[must_use]
    pub fn extents_or_unit(&self) -> [f64; 3] {
        let pick = |d: f64| if d > 0.0 { d } else { 1.0 };
        [pick(self.width()), pick(self.height()), pick(self.depth())]
    }
}

// ============================================================================
// 测试
// ============================================================================
