// salvis\crates\sv_interp\src/delaunay.rs

//! Bowyer-Watson 三角剖分
//!
//! 增量式 Delaunay 三角剖分，作为 2D 散点线性插值的几何基础。
//!
//! # 算法原理
//!
//! 1. 构造包含全部采样点的超级三角形
//! 2. 逐点插入：找出外接圆包含新点的"坏"三角形，
//!    挖出空腔后以新点与空腔边界重新扇形剖分
//! 3. 移除与超级三角形顶点相连的三角形
//!
//! 外接圆判定使用行列式判据，共圆情形（规则网格常见）
//! 取严格不等号，两条对角线剖分均可接受。
//!
//! # 示例
//!
//! ```
//! use sv_interp::delaunay::Triangulation;
//! use sv_geo::Point2D;
//!
//! let points = vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(1.0, 0.0),
//!     Point2D::new(0.0, 1.0),
//!     Point2D::new(1.0, 1.0),
//! ];
//! let tri = Triangulation::build(&points).unwrap();
//! assert_eq!(tri.triangles().len(), 2);
//! ```

use std::collections::HashMap;
use sv_foundation::{SvError, SvResult};
use sv_geo::Point2D;

/// Delaunay 三角剖分结果
///
/// 三角形以逆时针顶点索引存储，索引指向输入点集。
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<Point2D>,
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// 对点集执行三角剖分
    ///
    /// 输入点必须互不重合（重合点由调用方预先去重）。
    /// 与现有顶点重合的插入点会被跳过。
    ///
    /// # 错误
    ///
    /// - 点数少于 3
    /// - 点集退化（全部共线），无法构成任何三角形
    pub fn build(points: &[Point2D]) -> SvResult<Self> {
        let n = points.len();
        if n < 3 {
            return Err(SvError::invalid_input(format!(
                "三角剖分至少需要 3 个点, 实际 {n}"
            )));
        }

        // 超级三角形：以测区外接框为基准放大，保证包含全部点
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            if !p.is_finite() {
                return Err(SvError::invalid_input("三角剖分输入包含非有限坐标"));
            }
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let cx = (min_x + max_x) / 2.0;
        let cy = (min_y + max_y) / 2.0;
        let span = (max_x - min_x).max(max_y - min_y).max(1.0);

        let mut all_points: Vec<Point2D> = points.to_vec();
        all_points.push(Point2D::new(cx - 20.0 * span, cy - 10.0 * span));
        all_points.push(Point2D::new(cx + 20.0 * span, cy - 10.0 * span));
        all_points.push(Point2D::new(cx, cy + 20.0 * span));

        let mut triangles: Vec<[usize; 3]> = vec![make_ccw(&all_points, [n, n + 1, n + 2])];

        for i in 0..n {
            let p = all_points[i];

            // 外接圆包含新点的三角形构成空腔
            let mut bad = Vec::new();
            for (t, tri) in triangles.iter().enumerate() {
                if in_circumcircle(&all_points, *tri, &p) {
                    bad.push(t);
                }
            }

            // 与现有顶点重合（或精确落在公共外接圆上）时跳过
            if bad.is_empty() {
                continue;
            }

            // 空腔边界 = 只属于一个坏三角形的边
            let mut edge_count: HashMap<(usize, usize), (usize, usize, u32)> = HashMap::new();
            for &t in &bad {
                let [a, b, c] = triangles[t];
                for (u, v) in [(a, b), (b, c), (c, a)] {
                    let key = (u.min(v), u.max(v));
                    edge_count
                        .entry(key)
                        .and_modify(|e| e.2 += 1)
                        .or_insert((u, v, 1));
                }
            }

            // 移除坏三角形
            let mut keep = Vec::with_capacity(triangles.len());
            for (t, tri) in triangles.iter().enumerate() {
                if !bad.contains(&t) {
                    keep.push(*tri);
                }
            }
            triangles = keep;

            // 以新点对空腔边界扇形剖分
            for (u, v, count) in edge_count.into_values() {
                if count == 1 {
                    let tri = make_ccw(&all_points, [i, u, v]);
                    if orient2d(&all_points[tri[0]], &all_points[tri[1]], &all_points[tri[2]])
                        .abs()
                        > 0.0
                    {
                        triangles.push(tri);
                    }
                }
            }
        }

        // 移除与超级三角形顶点相连的三角形
        triangles.retain(|tri| tri.iter().all(|&v| v < n));

        if triangles.is_empty() {
            return Err(SvError::invalid_input(
                "三角剖分退化: 点集共线, 无法构成三角形",
            ));
        }

        all_points.truncate(n);
        Ok(Self {
            points: all_points,
            triangles,
        })
    }

    /// 剖分使用的点集
    #[must_use]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// 三角形列表（逆时针顶点索引）
    #[must_use]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// 三角形的顶点坐标
    #[must_use]
    pub fn triangle_vertices(&self, index: usize) -> [Point2D; 3] {
        let [a, b, c] = self.triangles[index];
        [self.points[a], self.points[b], self.points[c]]
    }
}

/// 有向面积的两倍, >0 表示逆时针
#[inline]
pub(crate) fn orient2d(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    (*b - *a).cross(&(*c - *a))
}

/// 保证三角形逆时针
fn make_ccw(points: &[Point2D], tri: [usize; 3]) -> [usize; 3] {
    if orient2d(&points[tri[0]], &points[tri[1]], &points[tri[2]]) < 0.0 {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    }
}

/// 外接圆包含判定（三角形须为逆时针）
fn in_circumcircle(points: &[Point2D], tri: [usize; 3], p: &Point2D) -> bool {
    let a = points[tri[0]];
    let b = points[tri[1]];
    let c = points[tri[2]];

    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let a2 = ax * ax + ay * ay;
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;

    let det = ax * (by * c2 - cy * b2) - ay * (bx * c2 - cx * b2) + a2 * (bx * cy - cx * by);

    det > 0.0
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_two_triangles() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 1.0),
        ];
        let tri = Triangulation::build(&points).unwrap();
        assert_eq!(tri.triangles().len(), 2);
    }

    #[test]
    fn test_square_with_center() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
            Point2D::new(1.0, 1.0),
        ];
        let tri = Triangulation::build(&points).unwrap();
        // 中心点将正方形剖分为 4 个三角形
        assert_eq!(tri.triangles().len(), 4);
        // 每个三角形都包含中心点索引
        for t in tri.triangles() {
            assert!(t.contains(&4));
        }
    }

    #[test]
    fn test_all_triangles_ccw() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.5),
            Point2D::new(1.5, 2.0),
            Point2D::new(0.5, 3.0),
            Point2D::new(2.5, 2.5),
        ];
        let tri = Triangulation::build(&points).unwrap();
        for &[a, b, c] in tri.triangles() {
            assert!(orient2d(&points[a], &points[b], &points[c]) > 0.0);
        }
    }

    #[test]
    fn test_collinear_is_error() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(3.0, 3.0),
        ];
        assert!(Triangulation::build(&points).is_err());
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)];
        assert!(Triangulation::build(&points).is_err());
    }

    #[test]
    fn test_non_finite_is_error() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(f64::NAN, 1.0),
        ];
        assert!(Triangulation::build(&points).is_err());
    }

    #[test]
    fn test_euler_relation() {
        // 凸位置随机点: 三角形数 = 2n - 2 - h (h 为凸包点数)
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
            Point2D::new(1.0, 1.5),
            Point2D::new(2.5, 2.0),
            Point2D::new(1.5, 3.0),
        ];
        let tri = Triangulation::build(&points).unwrap();
        // n = 7, 凸包 4 点 → 2*7 - 2 - 4 = 8
        assert_eq!(tri.triangles().len(), 8);
    }
}
