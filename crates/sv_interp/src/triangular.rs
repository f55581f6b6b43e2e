// salvis\crates\sv_interp\src/triangular.rs

//! 基于三角剖分的 2D 线性插值
//!
//! 对散点 (x, y, v) 做 Delaunay 剖分后，在三角形内部做重心坐标
//! 线性插值。凸包外的查询点返回 None，网格化时记为 NaN。
//! 地表面（DEM）与岩层面的网格化均使用本插值器。
//!
//! # 示例
//!
//! ```
//! use sv_interp::triangular::TriangularInterpolator;
//! use sv_geo::Point2D;
//!
//! let points = vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(1.0, 0.0),
//!     Point2D::new(0.0, 1.0),
//!     Point2D::new(1.0, 1.0),
//! ];
//! let values = vec![0.0, 1.0, 1.0, 2.0];
//!
//! let interp = TriangularInterpolator::new(points, values).unwrap();
//! let v = interp.interpolate(0.5, 0.5).unwrap();
//! assert!((v - 1.0).abs() < 1e-12);
//! ```

use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;
use sv_foundation::{SvError, SvResult};
use sv_geo::Point2D;

use crate::delaunay::{orient2d, Triangulation};
use crate::grid::{Grid2D, GridAxis};

/// 重心坐标内外判定容差（相对于三角形面积）
const INSIDE_TOLERANCE: f64 = 1e-10;

/// 三角形定位条目（外接框索引）
#[derive(Debug, Clone)]
struct TriangleEntry {
    index: usize,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for TriangleEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

/// 三角剖分线性插值器
///
/// 输入点在构造时去重（坐标完全相同的点保留最后一个值），
/// 随后构建三角剖分与三角形外接框索引用于快速定位。
pub struct TriangularInterpolator {
    triangulation: Triangulation,
    values: Vec<f64>,
    locator: RTree<TriangleEntry>,
}

impl TriangularInterpolator {
    /// 创建插值器
    ///
    /// # 错误
    ///
    /// - 点数与值数不一致
    /// - 去重后点数不足或点集退化（见 [`Triangulation::build`]）
    pub fn new(points: Vec<Point2D>, values: Vec<f64>) -> SvResult<Self> {
        SvError::check_size("interpolation values", points.len(), values.len())?;
        if points.is_empty() {
            return Err(SvError::empty_result("三角剖分插值输入点集"));
        }

        // 坐标去重，后出现的值覆盖先出现的值
        let mut seen: HashMap<(u64, u64), usize> = HashMap::new();
        let mut dedup_points: Vec<Point2D> = Vec::with_capacity(points.len());
        let mut dedup_values: Vec<f64> = Vec::with_capacity(points.len());
        for (p, v) in points.into_iter().zip(values) {
            let key = (p.x.to_bits(), p.y.to_bits());
            match seen.get(&key) {
                Some(&slot) => dedup_values[slot] = v,
                None => {
                    seen.insert(key, dedup_points.len());
                    dedup_points.push(p);
                    dedup_values.push(v);
                }
            }
        }

        let triangulation = Triangulation::build(&dedup_points)?;

        let entries: Vec<TriangleEntry> = triangulation
            .triangles()
            .iter()
            .enumerate()
            .map(|(index, _)| {
                let [a, b, c] = triangulation.triangle_vertices(index);
                let min = [a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)];
                let max = [a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)];
                TriangleEntry {
                    index,
                    aabb: AABB::from_corners(min, max),
                }
            })
            .collect();

        Ok(Self {
            triangulation,
            values: dedup_values,
            locator: RTree::bulk_load(entries),
        })
    }

    /// 去重后的采样点数量
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.triangulation.points().len()
    }

    /// 三角形数量
    #[must_use]
    pub fn n_triangles(&self) -> usize {
        self.triangulation.triangles().len()
    }

    /// 在指定点插值
    ///
    /// # 返回
    ///
    /// 点位于凸包内时返回 Some(线性插值结果)，否则返回 None。
    #[must_use]
    pub fn interpolate(&self, x: f64, y: f64) -> Option<f64> {
        let p = Point2D::new(x, y);
        let query = AABB::from_point([x, y]);

        for entry in self.locator.locate_in_envelope_intersecting(&query) {
            let [ia, ib, ic] = self.triangulation.triangles()[entry.index];
            let [a, b, c] = self.triangulation.triangle_vertices(entry.index);

            if let Some((wa, wb, wc)) = barycentric(&a, &b, &c, &p) {
                return Some(
                    wa * self.values[ia] + wb * self.values[ib] + wc * self.values[ic],
                );
            }
        }
        None
    }

    /// 在规则网格上插值
    ///
    /// 返回 `y_axis.len() × x_axis.len()` 的网格，行对应 y 轴，
    /// 列对应 x 轴。凸包外的单元为 NaN。按行并行计算。
    pub fn interpolate_grid(&self, x_axis: &GridAxis, y_axis: &GridAxis) -> SvResult<Grid2D> {
        let rows: Vec<Vec<f64>> = y_axis
            .values()
            .par_iter()
            .map(|&y| {
                x_axis
                    .values()
                    .iter()
                    .map(|&x| self.interpolate(x, y).unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();

        Grid2D::from_rows(rows)
    }
}

/// 重心坐标
///
/// 返回归一化权重 (wa, wb, wc)，点在三角形外时返回 None。
/// 三角形须为逆时针。
fn barycentric(a: &Point2D, b: &Point2D, c: &Point2D, p: &Point2D) -> Option<(f64, f64, f64)> {
    let area = orient2d(a, b, c);
    if area <= 0.0 {
        return None;
    }

    let wa = orient2d(p, b, c) / area;
    let wb = orient2d(a, p, c) / area;
    let wc = orient2d(a, b, p) / area;

    if wa >= -INSIDE_TOLERANCE && wb >= -INSIDE_TOLERANCE && wc >= -INSIDE_TOLERANCE {
        Some((wa, wb, wc))
    } else {
        None
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> (Vec<Point2D>, Vec<f64>) {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 1.0),
        ];
        // 线性场 v = x + y
        let values = vec![0.0, 1.0, 1.0, 2.0];
        (points, values)
    }

    #[test]
    fn test_linear_field_reproduction() {
        let (points, values) = unit_square();
        let interp = TriangularInterpolator::new(points, values).unwrap();

        for &(x, y) in &[(0.25, 0.25), (0.5, 0.5), (0.75, 0.1), (0.1, 0.9)] {
            let v = interp.interpolate(x, y).unwrap();
            assert!((v - (x + y)).abs() < 1e-12, "at ({x}, {y}): {v}");
        }
    }

    #[test]
    fn test_exact_at_sample_points() {
        let (points, values) = unit_square();
        let interp = TriangularInterpolator::new(points.clone(), values.clone()).unwrap();

        for (p, v) in points.iter().zip(&values) {
            let got = interp.interpolate(p.x, p.y).unwrap();
            assert!((got - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_outside_hull_is_none() {
        let (points, values) = unit_square();
        let interp = TriangularInterpolator::new(points, values).unwrap();

        assert!(interp.interpolate(-0.5, 0.5).is_none());
        assert!(interp.interpolate(1.5, 0.5).is_none());
        assert!(interp.interpolate(0.5, 2.0).is_none());
    }

    #[test]
    fn test_duplicate_last_value_wins() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(0.0, 0.0), // 与第一个点重合
        ];
        let values = vec![10.0, 1.0, 1.0, 42.0];

        let interp = TriangularInterpolator::new(points, values).unwrap();
        assert_eq!(interp.n_points(), 3);
        let v = interp.interpolate(0.0, 0.0).unwrap();
        assert!((v - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_size_mismatch_is_error() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)];
        assert!(TriangularInterpolator::new(points, vec![1.0]).is_err());
    }

    #[test]
    fn test_grid_interpolation_with_nan_outside() {
        // 菱形点集: 网格角点位于凸包外
        let points = vec![
            Point2D::new(0.0, -1.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(-1.0, 0.0),
            Point2D::new(0.0, 0.0),
        ];
        let values = vec![1.0, 2.0, 3.0, 4.0, 2.5];

        let interp = TriangularInterpolator::new(points, values).unwrap();
        let x_axis = GridAxis::linspace(-1.0, 1.0, 5).unwrap();
        let y_axis = GridAxis::linspace(-1.0, 1.0, 5).unwrap();
        let grid = interp.interpolate_grid(&x_axis, &y_axis).unwrap();

        assert_eq!(grid.nrows(), 5);
        assert_eq!(grid.ncols(), 5);
        // 角点在菱形外
        assert!(grid.get(0, 0).is_nan());
        assert!(grid.get(4, 4).is_nan());
        // 中心点精确
        assert!((grid.get(2, 2) - 2.5).abs() < 1e-12);
        assert!(grid.count_finite() > 0);
    }
}
