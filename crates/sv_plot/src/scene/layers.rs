// salvis\crates\sv_plot\src\scene/layers.rs

//! 静态分层场景
//!
//! 单一画面内叠加地表面、岩层面、盐度测点与三个正交盐度
//! 切片（水平切片 + 过测区均值位置的两个纵剖面）。

use tracing::debug;

use sv_foundation::{SvError, SvResult};
use sv_geo::{BoundingBox, BoundingBox3D, Point2D};
use sv_interp::{GridAxis, TriangularInterpolator, VolumeInterpolator};

use crate::color::{ColorBar, ColorScale};
use crate::figure::Figure;
use crate::layout::{Layout, Legend, Margin, Scene};
use crate::scene::{mean, RockLayerInput, SurveyInput};
use crate::trace::{AxisData, Marker, Scatter3dTrace, SurfaceTrace, Trace};

/// 岩层面色标轮换表（静态场景）
const ROCK_COLORSCALES: [ColorScale; 2] = [ColorScale::GREYS, ColorScale::BLUES];

/// 静态分层场景构建器
///
/// # 示例
///
/// ```ignore
/// let figure = LayeredSceneBuilder::new()
///     .with_survey(survey)
///     .with_rock_layer(rock1)
///     .with_rock_layer(rock2)
///     .with_resolution(200)
///     .with_slice_depth(-100.0)
///     .build()?;
/// ```
pub struct LayeredSceneBuilder<'a> {
    survey: Option<SurveyInput<'a>>,
    rock_layers: Vec<RockLayerInput<'a>>,
    resolution: usize,
    slice_depth: f64,
}

impl<'a> Default for LayeredSceneBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LayeredSceneBuilder<'a> {
    /// 创建构建器（默认 200×200 网格、-100 m 水平切片）
    #[must_use]
    pub fn new() -> Self {
        Self {
            survey: None,
            rock_layers: Vec::new(),
            resolution: 200,
            slice_depth: -100.0,
        }
    }

    /// 设置盐度测量数据
    #[must_use]
    pub fn with_survey(mut self, survey: SurveyInput<'a>) -> Self {
        self.survey = Some(survey);
        self
    }

    /// 追加岩层面
    #[must_use]
    pub fn with_rock_layer(mut self, layer: RockLayerInput<'a>) -> Self {
        self.rock_layers.push(layer);
        self
    }

    /// 设置网格分辨率
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// 设置水平切片高程
    #[must_use]
    pub fn with_slice_depth(mut self, z: f64) -> Self {
        self.slice_depth = z;
        self
    }

    /// 构建图形
    ///
    /// # 错误
    ///
    /// - 未提供测量数据
    /// - 数据切片长度不一致
    /// - 插值输入退化（点数不足、共线等）
    pub fn build(self) -> SvResult<Figure> {
        let survey = self
            .survey
            .ok_or_else(|| SvError::invalid_input("静态场景缺少盐度测量数据"))?;
        SvError::check_size("survey dem", survey.points.len(), survey.dem.len())?;
        SvError::check_size("survey tds", survey.points.len(), survey.tds.len())?;
        if survey.points.is_empty() {
            return Err(SvError::empty_result("盐度测量数据"));
        }

        let mut traces: Vec<Trace> = Vec::with_capacity(self.rock_layers.len() + 5);

        // 地表面
        traces.push(self.build_dem_surface(&survey)?);

        // 测点
        traces.push(self.build_sample_markers(&survey));

        // 岩层面
        for (i, layer) in self.rock_layers.iter().enumerate() {
            traces.push(self.build_rock_surface(layer, &ROCK_COLORSCALES[i % 2])?);
        }

        // 盐度切片
        let volume =
            VolumeInterpolator::new(survey.points.to_vec(), survey.tds.to_vec())?;
        let bbox = BoundingBox3D::from_points(survey.points)
            .ok_or_else(|| SvError::empty_result("盐度测量数据"))?;

        let x_axis = GridAxis::linspace(bbox.min.x, bbox.max.x, self.resolution)?;
        let y_axis = GridAxis::linspace(bbox.min.y, bbox.max.y, self.resolution)?;
        let z_axis = GridAxis::linspace(bbox.min.z, bbox.max.z, self.resolution)?;

        traces.push(self.build_horizontal_slice(&volume, &x_axis, &y_axis)?);

        let xs: Vec<f64> = survey.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = survey.points.iter().map(|p| p.y).collect();
        traces.push(self.build_x_slice(&volume, mean(&xs), &y_axis, &z_axis)?);
        traces.push(self.build_y_slice(&volume, mean(&ys), &x_axis, &z_axis)?);

        debug!("静态场景: {} 条轨迹", traces.len());

        let layout = Layout {
            margin: Some(Margin {
                l: 20,
                r: 50,
                b: 20,
                t: 20,
            }),
            scene: Some(Scene::survey()),
            legend: Some(Legend::explanation()),
            ..Layout::default()
        };

        Ok(Figure::new(traces, layout))
    }

    /// 地表面轨迹（Earth 色标）
    fn build_dem_surface(&self, survey: &SurveyInput<'a>) -> SvResult<Trace> {
        let xy: Vec<Point2D> = survey.points.iter().map(|p| p.xy()).collect();
        let bbox = BoundingBox::from_points(&xy)
            .ok_or_else(|| SvError::empty_result("地表面采样点"))?;

        let x_axis = GridAxis::linspace(bbox.min_x, bbox.max_x, self.resolution)?;
        let y_axis = GridAxis::linspace(bbox.min_y, bbox.max_y, self.resolution)?;

        let interp = TriangularInterpolator::new(xy, survey.dem.to_vec())?;
        let grid = interp.interpolate_grid(&x_axis, &y_axis)?;
        debug!(
            "地表面网格: {}×{}, 有效单元 {}",
            grid.nrows(),
            grid.ncols(),
            grid.count_finite()
        );

        Ok(SurfaceTrace::new(
            "Land surface",
            AxisData::Vector(x_axis.values().to_vec()),
            AxisData::Vector(y_axis.values().to_vec()),
            grid.to_rows(),
        )
        .with_colorscale(ColorScale::EARTH)
        .with_opacity(1.0)
        .into())
    }

    /// 盐度测点散点轨迹
    fn build_sample_markers(&self, survey: &SurveyInput<'a>) -> Trace {
        let x: Vec<f64> = survey.points.iter().map(|p| p.x).collect();
        let y: Vec<f64> = survey.points.iter().map(|p| p.y).collect();
        let z: Vec<f64> = survey.points.iter().map(|p| p.z).collect();
        let log_tds: Vec<f64> = survey.tds.iter().map(|&v| v.log10()).collect();

        let marker = Marker {
            size: 3.0,
            symbol: "square",
            colorscale: Some(ColorScale::RD_YL_BU),
            reversescale: Some(true),
            color: log_tds,
            showscale: Some(true),
            colorbar: Some(ColorBar::salinity(0.94)),
        };

        Scatter3dTrace::markers("Groundwater salinity", x, y, z, marker).into()
    }

    /// 岩层面轨迹
    fn build_rock_surface(
        &self,
        layer: &RockLayerInput<'a>,
        colorscale: &ColorScale,
    ) -> SvResult<Trace> {
        SvError::check_size("rock elevation", layer.points.len(), layer.elevation.len())?;
        let bbox = BoundingBox::from_points(layer.points)
            .ok_or_else(|| SvError::empty_result(format!("岩层面 {}", layer.name)))?;

        let x_axis = GridAxis::linspace(bbox.min_x, bbox.max_x, self.resolution)?;
        let y_axis = GridAxis::linspace(bbox.min_y, bbox.max_y, self.resolution)?;

        let interp =
            TriangularInterpolator::new(layer.points.to_vec(), layer.elevation.to_vec())?;
        let grid = interp.interpolate_grid(&x_axis, &y_axis)?;

        Ok(SurfaceTrace::new(
            layer.name.clone(),
            AxisData::Vector(x_axis.values().to_vec()),
            AxisData::Vector(y_axis.values().to_vec()),
            grid.to_rows(),
        )
        .with_colorscale(colorscale.clone())
        .with_opacity(0.7)
        .into())
    }

    /// 水平盐度切片
    fn build_horizontal_slice(
        &self,
        volume: &VolumeInterpolator,
        x_axis: &GridAxis,
        y_axis: &GridAxis,
    ) -> SvResult<Trace> {
        let slice = volume.horizontal_slice(x_axis, y_axis, self.slice_depth)?;
        let color = slice.map(f64::log10);

        Ok(SurfaceTrace::new(
            format!("Salinity at z={:.0} m", self.slice_depth),
            AxisData::Vector(x_axis.values().to_vec()),
            AxisData::Vector(y_axis.values().to_vec()),
            vec![vec![self.slice_depth; x_axis.len()]; y_axis.len()],
        )
        .with_surfacecolor(color.to_rows())
        .with_colorscale(ColorScale::RD_YL_BU)
        .with_reversescale()
        .with_colorbar(ColorBar::salinity(1.02))
        .with_opacity(0.8)
        .into())
    }

    /// 东西向纵剖面（固定 x = 测点均值）
    fn build_x_slice(
        &self,
        volume: &VolumeInterpolator,
        xv: f64,
        y_axis: &GridAxis,
        z_axis: &GridAxis,
    ) -> SvResult<Trace> {
        let slice = volume.vertical_slice_x(xv, y_axis, z_axis)?;
        let color = slice.map(f64::log10);

        // 行对应 y, 列对应 z: x 为常值面, y 沿行变化, z 沿列变化
        let ny = y_axis.len();
        let nz = z_axis.len();
        let y_matrix: Vec<Vec<f64>> = y_axis.values().iter().map(|&y| vec![y; nz]).collect();
        let z_matrix: Vec<Vec<f64>> = (0..ny).map(|_| z_axis.values().to_vec()).collect();

        Ok(SurfaceTrace::new(
            format!("Salinity at x={xv:.0} m"),
            AxisData::constant(ny, nz, xv),
            AxisData::Matrix(y_matrix),
            z_matrix,
        )
        .with_surfacecolor(color.to_rows())
        .with_colorscale(ColorScale::RD_YL_BU)
        .with_reversescale()
        .with_opacity(0.7)
        .into())
    }

    /// 南北向纵剖面（固定 y = 测点均值）
    fn build_y_slice(
        &self,
        volume: &VolumeInterpolator,
        yv: f64,
        x_axis: &GridAxis,
        z_axis: &GridAxis,
    ) -> SvResult<Trace> {
        let slice = volume.vertical_slice_y(yv, x_axis, z_axis)?;
        let color = slice.map(f64::log10);

        let nx = x_axis.len();
        let nz = z_axis.len();
        let x_matrix: Vec<Vec<f64>> = x_axis.values().iter().map(|&x| vec![x; nz]).collect();
        let z_matrix: Vec<Vec<f64>> = (0..nx).map(|_| z_axis.values().to_vec()).collect();

        Ok(SurfaceTrace::new(
            format!("Salinity at y={yv:.0} m"),
            AxisData::Matrix(x_matrix),
            AxisData::constant(nx, nz, yv),
            z_matrix,
        )
        .with_surfacecolor(color.to_rows())
        .with_colorscale(ColorScale::RD_YL_BU)
        .with_reversescale()
        .with_opacity(0.7)
        .into())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sv_geo::Point3D;

    /// 小型合成测区: 4×4×3 采样
    fn synthetic_survey() -> (Vec<Point3D>, Vec<f64>, Vec<f64>) {
        let mut points = Vec::new();
        let mut dem = Vec::new();
        let mut tds = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..3 {
                    let x = i as f64 * 1000.0;
                    let y = j as f64 * 1000.0;
                    let z = k as f64 * 50.0 - 150.0;
                    points.push(Point3D::new(x, y, z));
                    dem.push(10.0 + 0.001 * x);
                    tds.push(800.0 + 0.5 * (z + 150.0));
                }
            }
        }
        (points, dem, tds)
    }

    fn rock_samples() -> (Vec<Point2D>, Vec<f64>) {
        let mut points = Vec::new();
        let mut elev = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                points.push(Point2D::new(i as f64 * 1000.0, j as f64 * 1000.0));
                elev.push(-50.0 - i as f64 * 5.0);
            }
        }
        (points, elev)
    }

    #[test]
    fn test_layered_scene_trace_count() {
        let (points, dem, tds) = synthetic_survey();
        let (rock_pts, rock_elev) = rock_samples();

        let figure = LayeredSceneBuilder::new()
            .with_survey(SurveyInput {
                points: &points,
                dem: &dem,
                tds: &tds,
            })
            .with_rock_layer(RockLayerInput {
                name: "Rock Layer 1".to_string(),
                points: &rock_pts,
                elevation: &rock_elev,
            })
            .with_rock_layer(RockLayerInput {
                name: "Rock Layer 2".to_string(),
                points: &rock_pts,
                elevation: &rock_elev,
            })
            .with_resolution(10)
            .with_slice_depth(-100.0)
            .build()
            .unwrap();

        // 地表面 + 测点 + 2 岩层 + 水平切片 + 2 纵剖面
        assert_eq!(figure.n_traces(), 7);
        assert_eq!(figure.n_frames(), 0);
    }

    #[test]
    fn test_layered_scene_requires_survey() {
        let result = LayeredSceneBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_layered_scene_mismatched_input() {
        let (points, dem, _) = synthetic_survey();
        let bad_tds = vec![1.0; 3];

        let result = LayeredSceneBuilder::new()
            .with_survey(SurveyInput {
                points: &points,
                dem: &dem,
                tds: &bad_tds,
            })
            .with_resolution(10)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_layered_scene_json_shape() {
        let (points, dem, tds) = synthetic_survey();
        let figure = LayeredSceneBuilder::new()
            .with_survey(SurveyInput {
                points: &points,
                dem: &dem,
                tds: &tds,
            })
            .with_resolution(8)
            .build()
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["type"], "surface");
        assert_eq!(json["data"][0]["name"], "Land surface");
        assert_eq!(json["data"][1]["type"], "scatter3d");
        assert_eq!(json["layout"]["scene"]["xaxis"]["title"], "Easting (m)");
        // 水平切片 z 矩阵为常值面
        assert_eq!(json["data"][2]["z"][0][0], -100.0);
    }
}
