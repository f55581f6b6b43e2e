// salvis\crates\sv_interp\src/grid.rs

//! 采样网格
//!
//! 提供等距采样轴（linspace）与行优先存储的二维网格。
//! 网格的约定与绘图层一致：行对应第一个轴（通常为 y 或北向），
//! 列对应第二个轴（通常为 x 或东向）。缺测值以 NaN 标记。

use serde::{Deserialize, Serialize};
use sv_foundation::{SvError, SvResult};

// ============================================================================
// GridAxis - 等距采样轴
// ============================================================================

/// 等距采样轴
///
/// 在 [min, max] 区间内生成 n 个等距采样点，端点包含在内。
///
/// # 示例
///
/// ```
/// use sv_interp::grid::GridAxis;
///
/// let axis = GridAxis::linspace(0.0, 10.0, 5).unwrap();
/// assert_eq!(axis.values(), &[0.0, 2.5, 5.0, 7.5, 10.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    values: Vec<f64>,
}

impl GridAxis {
    /// 创建等距采样轴
    ///
    /// # 错误
    ///
    /// - `n < 2`
    /// - 区间端点非有限或 `max <= min`
    pub fn linspace(min: f64, max: f64, n: usize) -> SvResult<Self> {
        if n < 2 {
            return Err(SvError::invalid_input(format!(
                "采样轴至少需要 2 个点, 实际 {n}"
            )));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(SvError::invalid_input("采样轴端点必须为有限数"));
        }
        if max <= min {
            return Err(SvError::invalid_input(format!(
                "采样轴区间无效: [{min}, {max}]"
            )));
        }

        let step = (max - min) / (n - 1) as f64;
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            values.push(min + i as f64 * step);
        }
        // 消除浮点累积误差，保证右端点精确
        values[n - 1] = max;

        Ok(Self { values })
    }

    /// 采样点切片
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 采样点数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 采样轴恒非空（构造时 n >= 2）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 最小值
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// 最大值
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// 采样步长
    #[must_use]
    pub fn step(&self) -> f64 {
        (self.max() - self.min()) / (self.values.len() - 1) as f64
    }
}

// ============================================================================
// Grid2D - 行优先二维网格
// ============================================================================

/// 行优先二维网格
///
/// `nrows × ncols` 的 f64 网格，NaN 表示缺测。
/// 用作插值输出与绘图层的 z / surfacecolor 矩阵。
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl Grid2D {
    /// 创建填充指定值的网格
    #[must_use]
    pub fn filled(nrows: usize, ncols: usize, value: f64) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![value; nrows * ncols],
        }
    }

    /// 创建 NaN 填充的网格
    #[must_use]
    pub fn nan(nrows: usize, ncols: usize) -> Self {
        Self::filled(nrows, ncols, f64::NAN)
    }

    /// 从行优先平铺数据拼装网格
    ///
    /// # 错误
    ///
    /// 数据长度与 `nrows * ncols` 不符时返回错误。
    pub fn from_flat(nrows: usize, ncols: usize, data: Vec<f64>) -> SvResult<Self> {
        SvError::check_size("grid data", nrows * ncols, data.len())?;
        Ok(Self { nrows, ncols, data })
    }

    /// 从行向量拼装网格
    ///
    /// # 错误
    ///
    /// 行长度不一致时返回错误。
    pub fn from_rows(rows: Vec<Vec<f64>>) -> SvResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in &rows {
            SvError::check_size("grid row", ncols, row.len())?;
            data.extend_from_slice(row);
        }
        Ok(Self { nrows, ncols, data })
    }

    /// 行数
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// 列数
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// 读取单元值
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.ncols + col]
    }

    /// 写入单元值
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.ncols + col] = value;
    }

    /// 底层数据切片
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// 对每个单元应用函数，返回新网格
    ///
    /// NaN 经函数原样传播（例如 log10(NaN) = NaN）。
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// 导出为行向量（绘图层序列化用）
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows)
            .map(|r| self.data[r * self.ncols..(r + 1) * self.ncols].to_vec())
            .collect()
    }

    /// 有限值数量
    #[must_use]
    pub fn count_finite(&self) -> usize {
        self.data.iter().filter(|v| v.is_finite()).count()
    }

    /// 有限值的最小与最大值
    ///
    /// 全为 NaN 时返回 None。
    #[must_use]
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &v in &self.data {
            if v.is_finite() {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        range
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_basic() {
        let axis = GridAxis::linspace(0.0, 1.0, 11).unwrap();
        assert_eq!(axis.len(), 11);
        assert_eq!(axis.min(), 0.0);
        assert_eq!(axis.max(), 1.0);
        assert!((axis.step() - 0.1).abs() < 1e-12);
        assert!((axis.values()[5] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_exact_endpoint() {
        let axis = GridAxis::linspace(-100.0, 250.0, 25).unwrap();
        assert_eq!(axis.values()[24], 250.0);
    }

    #[test]
    fn test_linspace_invalid() {
        assert!(GridAxis::linspace(0.0, 1.0, 1).is_err());
        assert!(GridAxis::linspace(1.0, 1.0, 10).is_err());
        assert!(GridAxis::linspace(2.0, 1.0, 10).is_err());
        assert!(GridAxis::linspace(f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn test_grid_roundtrip() {
        let mut grid = Grid2D::nan(2, 3);
        grid.set(0, 0, 1.0);
        grid.set(1, 2, 6.0);

        assert_eq!(grid.get(0, 0), 1.0);
        assert!(grid.get(0, 1).is_nan());
        assert_eq!(grid.count_finite(), 2);

        let rows = grid.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], 6.0);
    }

    #[test]
    fn test_grid_from_rows_mismatch() {
        let result = Grid2D::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_grid_map_propagates_nan() {
        let mut grid = Grid2D::filled(1, 2, 100.0);
        grid.set(0, 1, f64::NAN);
        let logged = grid.map(f64::log10);
        assert!((logged.get(0, 0) - 2.0).abs() < 1e-12);
        assert!(logged.get(0, 1).is_nan());
    }

    #[test]
    fn test_grid_finite_range() {
        let mut grid = Grid2D::nan(2, 2);
        assert!(grid.finite_range().is_none());
        grid.set(0, 0, 5.0);
        grid.set(1, 1, -3.0);
        assert_eq!(grid.finite_range(), Some((-3.0, 5.0)));
    }
}
