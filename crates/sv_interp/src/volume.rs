// salvis\crates\sv_interp\src/volume.rs

//! 局部线性 3D 散点插值
//!
//! 对散点体数据 (x, y, z, v) 做切片插值。完整的 3D Delaunay
//! 四面体剖分实现代价高，本模块提供局部化的线性估计：
//! 对每个查询点取 k 近邻做加权最小二乘线性拟合，
//! 法方程病态时回退到反距离加权。
//!
//! # 算法原理
//!
//! 1. 各轴按测区范围归一化（水平范围通常比垂向大三个数量级）
//! 2. R-tree 搜索归一化空间中的 k 近邻
//! 3. 以查询点为中心拟合 v = a + b·dx + c·dy + d·dz，取截距 a
//! 4. 最近邻距离超过支撑距离（平均采样间距的倍数）时返回 None，
//!    近似"凸包外为缺测"的行为
//!
//! # 示例
//!
//! ```ignore
//! use sv_interp::volume::VolumeInterpolator;
//! use sv_geo::Point3D;
//!
//! let interp = VolumeInterpolator::new(points, values)?
//!     .with_neighbors(16)
//!     .with_support_factor(3.0);
//!
//! let v = interp.interpolate(&Point3D::new(x, y, z));
//! ```

use nalgebra::{Matrix4, Vector4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sv_foundation::{SvError, SvResult};
use sv_geo::{BoundingBox3D, Point3D, SpatialIndex3D};

use crate::grid::{Grid2D, GridAxis};

/// 体插值配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// 参与拟合的近邻数
    pub neighbors: usize,
    /// 最小近邻数，不足时放弃线性拟合
    pub min_neighbors: usize,
    /// 支撑距离因子：最近邻距离超过 因子×平均采样间距 时视为数据支撑之外
    pub support_factor: f64,
    /// 距离容差（归一化空间），小于此值视为命中采样点
    pub distance_tolerance: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            neighbors: 16,
            min_neighbors: 4,
            support_factor: 3.0,
            distance_tolerance: 1e-9,
        }
    }
}

/// 局部线性体插值器
///
/// 采样点在构造时归一化并建立空间索引；平均采样间距
/// （归一化空间中最近邻距离的均值）决定默认支撑距离。
pub struct VolumeInterpolator {
    samples: Vec<Point3D>,
    values: Vec<f64>,
    index: SpatialIndex3D<usize>,
    origin: Point3D,
    scale: [f64; 3],
    mean_spacing: f64,
    config: VolumeConfig,
}

impl VolumeInterpolator {
    /// 创建体插值器
    ///
    /// # 错误
    ///
    /// - 点数与值数不一致
    /// - 点集为空或全部为非有限值
    pub fn new(points: Vec<Point3D>, values: Vec<f64>) -> SvResult<Self> {
        SvError::check_size("volume values", points.len(), values.len())?;

        // 过滤非有限样本
        let mut samples_raw = Vec::with_capacity(points.len());
        let mut values_raw = Vec::with_capacity(values.len());
        for (p, v) in points.into_iter().zip(values) {
            if p.is_finite() && v.is_finite() {
                samples_raw.push(p);
                values_raw.push(v);
            }
        }
        if samples_raw.is_empty() {
            return Err(SvError::empty_result("体插值输入点集"));
        }

        let bbox = BoundingBox3D::from_points(&samples_raw)
            .ok_or_else(|| SvError::empty_result("体插值输入点集"))?;
        let origin = bbox.min;
        let scale = bbox.extents_or_unit();

        // 归一化到单位立方体量级
        let samples: Vec<Point3D> = samples_raw
            .iter()
            .map(|p| normalize(p, &origin, &scale))
            .collect();

        let index = SpatialIndex3D::bulk_load(
            samples.iter().enumerate().map(|(i, p)| (*p, i)).collect(),
        );

        let mean_spacing = estimate_mean_spacing(&samples, &index);

        Ok(Self {
            samples,
            values: values_raw,
            index,
            origin,
            scale,
            mean_spacing,
            config: VolumeConfig::default(),
        })
    }

    /// 使用指定配置创建
    pub fn with_config(mut self, config: VolumeConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置近邻数
    pub fn with_neighbors(mut self, n: usize) -> Self {
        self.config.neighbors = n.max(1);
        self
    }

    /// 设置支撑距离因子
    pub fn with_support_factor(mut self, factor: f64) -> Self {
        self.config.support_factor = factor;
        self
    }

    /// 采样点数量
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// 当前配置
    #[must_use]
    pub fn config(&self) -> &VolumeConfig {
        &self.config
    }

    /// 在指定点插值
    ///
    /// # 返回
    ///
    /// 查询点落在数据支撑范围内时返回 Some(估计值)，否则返回 None。
    #[must_use]
    pub fn interpolate(&self, point: &Point3D) -> Option<f64> {
        if !point.is_finite() {
            return None;
        }
        let q = normalize(point, &self.origin, &self.scale);

        let neighbors = self
            .index
            .query_nearest_with_distance(&q, self.config.neighbors);
        if neighbors.is_empty() {
            return None;
        }

        let nearest_dist = neighbors[0].2.sqrt();

        // 命中采样点
        if nearest_dist < self.config.distance_tolerance {
            return Some(self.values[*neighbors[0].1]);
        }

        // 数据支撑之外
        if nearest_dist > self.config.support_factor * self.mean_spacing {
            return None;
        }

        // 近邻不足时直接反距离加权
        if neighbors.len() < self.config.min_neighbors {
            return Some(self.idw_estimate(&neighbors));
        }

        match self.linear_estimate(&q, &neighbors) {
            Some(v) => Some(v),
            None => Some(self.idw_estimate(&neighbors)),
        }
    }

    /// 加权最小二乘线性拟合
    ///
    /// 以查询点为中心求解 4×4 法方程；解非有限或明显超出
    /// 邻域值范围（病态外推）时返回 None 交由 IDW 回退。
    fn linear_estimate(
        &self,
        q: &Point3D,
        neighbors: &[(&Point3D, &usize, f64)],
    ) -> Option<f64> {
        let reg = (0.01 * self.mean_spacing).powi(2).max(f64::MIN_POSITIVE);

        let mut a = Matrix4::<f64>::zeros();
        let mut b = Vector4::<f64>::zeros();

        let mut v_min = f64::INFINITY;
        let mut v_max = f64::NEG_INFINITY;

        for &(p, &i, d2) in neighbors {
            let w = 1.0 / (d2 + reg);
            let v = self.values[i];
            v_min = v_min.min(v);
            v_max = v_max.max(v);

            let phi = [1.0, p.x - q.x, p.y - q.y, p.z - q.z];
            for r in 0..4 {
                for c in 0..4 {
                    a[(r, c)] += w * phi[r] * phi[c];
                }
                b[r] += w * phi[r] * v;
            }
        }

        let coeffs = a.lu().solve(&b)?;
        let estimate = coeffs[0];
        if !estimate.is_finite() {
            return None;
        }

        // 病态拟合的估计值会远超邻域值范围
        let spread = (v_max - v_min).max(1e-12);
        if estimate < v_min - 0.5 * spread || estimate > v_max + 0.5 * spread {
            return None;
        }

        Some(estimate)
    }

    /// 反距离加权回退
    fn idw_estimate(&self, neighbors: &[(&Point3D, &usize, f64)]) -> f64 {
        let reg = (0.01 * self.mean_spacing).powi(2).max(f64::MIN_POSITIVE);
        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;
        for &(_, &i, d2) in neighbors {
            let w = 1.0 / (d2 + reg);
            weight_sum += w;
            value_sum += w * self.values[i];
        }
        value_sum / weight_sum
    }

    /// 水平切片
    ///
    /// 在固定高程 z 上对 x/y 网格插值。返回 `y × x` 网格，
    /// 行对应 y 轴。按行并行。
    pub fn horizontal_slice(
        &self,
        x_axis: &GridAxis,
        y_axis: &GridAxis,
        z: f64,
    ) -> SvResult<Grid2D> {
        let rows: Vec<Vec<f64>> = y_axis
            .values()
            .par_iter()
            .map(|&y| {
                x_axis
                    .values()
                    .iter()
                    .map(|&x| {
                        self.interpolate(&Point3D::new(x, y, z))
                            .unwrap_or(f64::NAN)
                    })
                    .collect()
            })
            .collect();

        Grid2D::from_rows(rows)
    }

    /// 东西向纵剖面（固定 x）
    ///
    /// 返回 `y × z` 网格，行对应 y 轴，列对应 z 轴。
    pub fn vertical_slice_x(
        &self,
        x: f64,
        y_axis: &GridAxis,
        z_axis: &GridAxis,
    ) -> SvResult<Grid2D> {
        let rows: Vec<Vec<f64>> = y_axis
            .values()
            .par_iter()
            .map(|&y| {
                z_axis
                    .values()
                    .iter()
                    .map(|&z| {
                        self.interpolate(&Point3D::new(x, y, z))
                            .unwrap_or(f64::NAN)
                    })
                    .collect()
            })
            .collect();

        Grid2D::from_rows(rows)
    }

    /// 南北向纵剖面（固定 y）
    ///
    /// 返回 `x × z` 网格，行对应 x 轴，列对应 z 轴。
    pub fn vertical_slice_y(
        &self,
        y: f64,
        x_axis: &GridAxis,
        z_axis: &GridAxis,
    ) -> SvResult<Grid2D> {
        let rows: Vec<Vec<f64>> = x_axis
            .values()
            .par_iter()
            .map(|&x| {
                z_axis
                    .values()
                    .iter()
                    .map(|&z| {
                        self.interpolate(&Point3D::new(x, y, z))
                            .unwrap_or(f64::NAN)
                    })
                    .collect()
            })
            .collect();

        Grid2D::from_rows(rows)
    }
}

/// 各轴归一化
#[inline]
fn normalize(p: &Point3D, origin: &Point3D, scale: &[f64; 3]) -> Point3D {
    Point3D::new(
        (p.x - origin.x) / scale[0],
        (p.y - origin.y) / scale[1],
        (p.z - origin.z) / scale[2],
    )
}

/// 估计平均采样间距（归一化空间）
///
/// 对最多 1000 个样本取最近邻距离的均值。单点数据集返回 1.0。
fn estimate_mean_spacing(samples: &[Point3D], index: &SpatialIndex3D<usize>) -> f64 {
    if samples.len() < 2 {
        return 1.0;
    }

    let stride = (samples.len() / 1000).max(1);
    let mut sum = 0.0;
    let mut count = 0usize;

    for p in samples.iter().step_by(stride) {
        let nearest = index.query_nearest_with_distance(p, 2);
        if nearest.len() == 2 {
            sum += nearest[1].2.sqrt();
            count += 1;
        }
    }

    if count == 0 {
        1.0
    } else {
        (sum / count as f64).max(f64::MIN_POSITIVE)
    }
}

// ============================================================================
// 测试
// ============================================================================
