// salvis\crates\sv_geo\src/spatial_index.rs

//! 空间索引实现
//!
//! 基于 R-tree 的 3D 点索引，是体插值器的邻域搜索后端。
//! 索引在调用方提供的坐标空间中工作（体插值器传入
//! 归一化坐标），因此不关心点的物理尺度。
//!
//! # 示例
//!
//! ```
//! use sv_geo::spatial_index::SpatialIndex3D;
//! use sv_geo::geometry::Point3D;
//!
//! let index = SpatialIndex3D::bulk_load(vec![
//!     (Point3D::new(0.0, 0.0, 0.0), 0usize),
//!     (Point3D::new(10.0, 0.0, 0.0), 1usize),
//! ]);
//!
//! let nearest = index.query_nearest(&Point3D::new(1.0, 0.0, 0.0), 1);
//! assert_eq!(*nearest[0].1, 0);
//! ```

use crate::geometry::Point3D;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// 空间索引条目
#[derive(Debug, Clone)]
struct Entry3D<T> {
    point: Point3D,
    data: T,
}

impl<T> RTreeObject for Entry3D<T> {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x, self.point.y, self.point.z])
    }
}

impl<T> PointDistance for Entry3D<T> {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point.x - point[0];
        let dy = self.point.y - point[1];
        let dz = self.point.z - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// 3D 空间索引
///
/// 基于 R-tree 的点索引，用于高效的最近邻与半径查询。
pub struct SpatialIndex3D<T> {
    tree: RTree<Entry3D<T>>,
}

impl<T> Default for SpatialIndex3D<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpatialIndex3D<T> {
    /// 创建空的空间索引
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// 从点集批量构建
    #[must_use]
    pub fn bulk_load(points: Vec<(Point3D, T)>) -> Self {
        let entries: Vec<Entry3D<T>> = points
            .into_iter()
            .map(|(point, data)| Entry3D { point, data })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// 插入点
    pub fn insert(&mut self, point: Point3D, data: T) {
        self.tree.insert(Entry3D { point, data });
    }

    /// 查询最近的 k 个点
    #[must_use]
    pub fn query_nearest(&self, point: &Point3D, k: usize) -> Vec<(&Point3D, &T)> {
        self.tree
            .nearest_neighbor_iter(&[point.x, point.y, point.z])
            .take(k)
            .map(|entry| (&entry.point, &entry.data))
            .collect()
    }

    /// 查询最近的 k 个点及其距离平方
    #[must_use]
    pub fn query_nearest_with_distance(
        &self,
        point: &Point3D,
        k: usize,
    ) -> Vec<(&Point3D, &T, f64)> {
        self.tree
            .nearest_neighbor_iter_with_distance_2(&[point.x, point.y, point.z])
            .take(k)
            .map(|(entry, d2)| (&entry.point, &entry.data, d2))
            .collect()
    }

    /// 查询指定距离内的点
    #[must_use]
    pub fn query_within_distance(&self, point: &Point3D, distance: f64) -> Vec<(&Point3D, &T)> {
        self.tree
            .locate_within_distance([point.x, point.y, point.z], distance * distance)
            .map(|entry| (&entry.point, &entry.data))
            .collect()
    }

    /// 返回索引中的点数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// 检查索引是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_with_distance() {
        let index = SpatialIndex3D::bulk_load(vec![
            (Point3D::new(0.0, 0.0, 0.0), 0usize),
            (Point3D::new(3.0, 4.0, 0.0), 1usize),
        ]);

        let result = index.query_nearest_with_distance(&Point3D::new(0.0, 0.0, 0.0), 2);
        assert_eq!(result.len(), 2);
        assert_eq!(*result[0].1, 0);
        assert!(result[0].2 < 1e-14);
        assert!((result[1].2 - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_ordering() {
        let index = SpatialIndex3D::bulk_load(vec![
            (Point3D::new(0.0, 0.0, 0.0), 0usize),
            (Point3D::new(10.0, 0.0, 0.0), 1usize),
            (Point3D::new(0.0, 0.0, 5.0), 2usize),
        ]);

        let nearest = index.query_nearest(&Point3D::new(1.0, 0.0, 0.0), 2);
        assert_eq!(*nearest[0].1, 0);
        assert_eq!(*nearest[1].1, 2);
    }

    #[test]
    fn test_within_distance() {
        let index = SpatialIndex3D::bulk_load(vec![
            (Point3D::new(0.0, 0.0, 0.0), 0usize),
            (Point3D::new(100.0, 0.0, 0.0), 1usize),
        ]);

        let close = index.query_within_distance(&Point3D::new(1.0, 0.0, 0.0), 5.0);
        assert_eq!(close.len(), 1);
        assert_eq!(*close[0].1, 0);
    }

    #[test]
    fn test_empty_index() {
        let index: SpatialIndex3D<usize> = SpatialIndex3D::new();
        assert!(index.is_empty());
        assert!(index.query_nearest(&Point3D::ZERO, 3).is_empty());
    }

    #[test]
    fn test_insert_after_bulk_load() {
        let mut index = SpatialIndex3D::bulk_load(vec![(Point3D::new(0.0, 0.0, 0.0), 0usize)]);
        index.insert(Point3D::new(1.0, 1.0, 1.0), 1usize);
        assert_eq!(index.len(), 2);
    }
}
