// salvis\crates\sv_plot\src\scene/animated.rs

//! 深度动画场景
//!
//! 地表面、纯色岩层面与盐度测点保持不变，水平盐度切片
//! 沿高程逐帧移动。每帧附带深度标注，布局含播放/暂停
//! 按钮与深度滑块。

use tracing::debug;

use sv_foundation::{SvError, SvResult};
use sv_geo::{BoundingBox, BoundingBox3D, Point2D};
use sv_interp::{Grid2D, GridAxis, TriangularInterpolator, VolumeInterpolator};

use crate::color::{salinity_cmax, salinity_cmin, ColorBar, ColorScale};
use crate::figure::{Figure, Frame};
use crate::layout::{
    Annotation, Font, Layout, Legend, Margin, Scene, Slider, Title, UpdateMenu,
};
use crate::scene::{RockLayerInput, SurveyInput};
use crate::trace::{AxisData, Marker, Scatter3dTrace, SurfaceTrace, Trace};

/// 岩层面纯色轮换表（动画场景）
const ROCK_COLORS: [&str; 2] = ["rgba(255,0,0,1)", "rgba(0,255,0,1)"];

/// 深度动画场景构建器
///
/// # 示例
///
/// ```ignore
/// let figure = AnimatedSceneBuilder::new()
///     .with_survey(survey)
///     .with_rock_layer(rock1)
///     .with_rock_layer(rock2)
///     .with_levels(25)
///     .build()?;
/// ```
pub struct AnimatedSceneBuilder<'a> {
    survey: Option<SurveyInput<'a>>,
    rock_layers: Vec<RockLayerInput<'a>>,
    resolution: usize,
    rock_resolution: usize,
    levels: usize,
    frame_ms: u64,
}

impl<'a> Default for AnimatedSceneBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> AnimatedSceneBuilder<'a> {
    /// 创建构建器
    ///
    /// 默认：动画网格 100×100，岩层面网格 200×200，
    /// 25 个深度级别，每帧 500 ms。
    #[must_use]
    pub fn new() -> Self {
        Self {
            survey: None,
            rock_layers: Vec::new(),
            resolution: 100,
            rock_resolution: 200,
            levels: 25,
            frame_ms: 500,
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

    /// 设置动画网格分辨率
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// 设置岩层面网格分辨率
    #[must_use]
    pub fn with_rock_resolution(mut self, resolution: usize) -> Self {
        self.rock_resolution = resolution;
        self
    }

    /// 设置深度级别数
    #[must_use]
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// 设置帧间隔（毫秒）
    #[must_use]
    pub fn with_frame_ms(mut self, frame_ms: u64) -> Self {
        self.frame_ms = frame_ms;
        self
    }

    /// 构建图形
    ///
    /// # 错误
    ///
    /// - 未提供测量数据或数据切片长度不一致
    /// - 深度级别数小于 2
    /// - 插值输入退化
    pub fn build(self) -> SvResult<Figure> {
        let survey = self
            .survey
            .ok_or_else(|| SvError::invalid_input("动画场景缺少盐度测量数据"))?;
        SvError::check_size("survey dem", survey.points.len(), survey.dem.len())?;
        SvError::check_size("survey tds", survey.points.len(), survey.tds.len())?;
        if survey.points.is_empty() {
            return Err(SvError::empty_result("盐度测量数据"));
        }
        if self.levels < 2 {
            return Err(SvError::invalid_input(format!(
                "深度级别数至少为 2, 实际 {}",
                self.levels
            )));
        }

        // 静态轨迹: 地表面、测点、岩层面
        let mut static_traces: Vec<Trace> = Vec::with_capacity(self.rock_layers.len() + 2);
        static_traces.push(self.build_dem_surface(&survey)?);
        static_traces.push(self.build_sample_markers(&survey));
        for (i, layer) in self.rock_layers.iter().enumerate() {
            static_traces.push(self.build_rock_surface(layer, ROCK_COLORS[i % 2])?);
        }

        // 深度级别与逐帧切片
        let volume =
            VolumeInterpolator::new(survey.points.to_vec(), survey.tds.to_vec())?;
        let bbox = BoundingBox3D::from_points(survey.points)
            .ok_or_else(|| SvError::empty_result("盐度测量数据"))?;

        let x_axis = GridAxis::linspace(bbox.min.x, bbox.max.x, self.resolution)?;
        let y_axis = GridAxis::linspace(bbox.min.y, bbox.max.y, self.resolution)?;
        let z_levels = GridAxis::linspace(bbox.min.z, bbox.max.z, self.levels)?;

        let mut frames = Vec::with_capacity(self.levels);
        let mut initial_slice: Option<Trace> = None;

        for (i, &z) in z_levels.values().iter().enumerate() {
            let slice = volume.horizontal_slice(&x_axis, &y_axis, z)?;
            debug!(
                "深度切片 {}/{}: z={:.1} m, 有效单元 {}",
                i + 1,
                self.levels,
                z,
                slice.count_finite()
            );

            if i == 0 {
                // 初始画面的切片更醒目
                initial_slice =
                    Some(self.build_slice_trace(&x_axis, &y_axis, z, &slice, 0.7, true));
            }

            let mut data = static_traces.clone();
            data.push(self.build_slice_trace(&x_axis, &y_axis, z, &slice, 0.3, i == 0));

            frames.push(Frame {
                name: format!("{z:.1}"),
                data,
                layout: Some(Layout {
                    annotations: Some(vec![Annotation::depth_label(z)]),
                    ..Layout::default()
                }),
            });
        }

        let mut data = static_traces;
        if let Some(slice) = initial_slice {
            data.push(slice);
        }

        let layout = Layout {
            title: Some(Title {
                text: "<b>Groundwater salinity</b>".to_string(),
                x: Some(0.0),
                y: Some(0.95),
                font: Some(Font::sized(44, "black")),
            }),
            margin: Some(Margin {
                l: 20,
                r: 50,
                b: 20,
                t: 100,
            }),
            scene: Some(Scene::survey()),
            legend: Some(Legend::explanation()),
            updatemenus: Some(vec![UpdateMenu::play_pause(self.frame_ms)]),
            sliders: Some(vec![Slider::depth(z_levels.values())]),
            ..Layout::default()
        };

        Ok(Figure::with_frames(data, layout, frames))
    }

    /// 地表面轨迹
    fn build_dem_surface(&self, survey: &SurveyInput<'a>) -> SvResult<Trace> {
        let xy: Vec<Point2D> = survey.points.iter().map(|p| p.xy()).collect();
        let bbox = BoundingBox::from_points(&xy)
            .ok_or_else(|| SvError::empty_result("地表面采样点"))?;

        let x_axis = GridAxis::linspace(bbox.min_x, bbox.max_x, self.resolution)?;
        let y_axis = GridAxis::linspace(bbox.min_y, bbox.max_y, self.resolution)?;

        let interp = TriangularInterpolator::new(xy, survey.dem.to_vec())?;
        let grid = interp.interpolate_grid(&x_axis, &y_axis)?;

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

    /// 盐度测点散点轨迹（带悬浮提示）
    fn build_sample_markers(&self, survey: &SurveyInput<'a>) -> Trace {
        let x: Vec<f64> = survey.points.iter().map(|p| p.x).collect();
        let y: Vec<f64> = survey.points.iter().map(|p| p.y).collect();
        let z: Vec<f64> = survey.points.iter().map(|p| p.z).collect();
        let log_tds: Vec<f64> = survey.tds.iter().map(|&v| v.log10()).collect();
        let customdata: Vec<Vec<f64>> = survey.tds.iter().map(|&v| vec![v]).collect();

        let marker = Marker {
            size: 3.0,
            symbol: "square",
            colorscale: Some(ColorScale::RD_YL_BU),
            reversescale: Some(true),
            color: log_tds,
            showscale: Some(false),
            colorbar: None,
        };

        Scatter3dTrace::markers("Groundwater salinity", x, y, z, marker)
            .with_hover(
                "Easting: %{x:.0f} m<br>\
                 Northing: %{y:.0f} m<br>\
                 Elevation: %{z:.0f} m<br>\
                 TDS: %{customdata[0]:.0f} mg/L<br>\
                 log10(TDS): %{marker.color:.2f}<extra></extra>",
                customdata,
            )
            .into()
    }

    /// 纯色岩层面轨迹
    fn build_rock_surface(
        &self,
        layer: &RockLayerInput<'a>,
        color: &str,
    ) -> SvResult<Trace> {
        SvError::check_size("rock elevation", layer.points.len(), layer.elevation.len())?;
        let bbox = BoundingBox::from_points(layer.points)
            .ok_or_else(|| SvError::empty_result(format!("岩层面 {}", layer.name)))?;

        let x_axis = GridAxis::linspace(bbox.min_x, bbox.max_x, self.rock_resolution)?;
        let y_axis = GridAxis::linspace(bbox.min_y, bbox.max_y, self.rock_resolution)?;

        let interp =
            TriangularInterpolator::new(layer.points.to_vec(), layer.elevation.to_vec())?;
        let grid = interp.interpolate_grid(&x_axis, &y_axis)?;

        // 纯色层面: 上色矩阵恒为零, 色标两端同色
        Ok(SurfaceTrace::new(
            layer.name.clone(),
            AxisData::Vector(x_axis.values().to_vec()),
            AxisData::Vector(y_axis.values().to_vec()),
            grid.to_rows(),
        )
        .with_surfacecolor(vec![vec![0.0; x_axis.len()]; y_axis.len()])
        .with_colorscale(ColorScale::solid(color))
        .with_opacity(0.4)
        .into())
    }

    /// 单帧盐度切片轨迹
    fn build_slice_trace(
        &self,
        x_axis: &GridAxis,
        y_axis: &GridAxis,
        z: f64,
        slice: &Grid2D,
        opacity: f64,
        showlegend: bool,
    ) -> Trace {
        let color = slice.map(f64::log10);

        SurfaceTrace::new(
            "Salinity slice",
            AxisData::Vector(x_axis.values().to_vec()),
            AxisData::Vector(y_axis.values().to_vec()),
            vec![vec![z; x_axis.len()]; y_axis.len()],
        )
        .with_surfacecolor(color.to_rows())
        .with_colorscale(ColorScale::RD_YL_BU)
        .with_reversescale()
        .with_color_range(salinity_cmin(), salinity_cmax())
        .with_colorbar(ColorBar::salinity(1.02))
        .with_opacity(opacity)
        .with_showlegend(showlegend)
        .into()
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sv_geo::Point3D;

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
                    dem.push(5.0 + 0.002 * y);
                    tds.push(600.0 - 2.0 * z);
                }
            }
        }
        (points, dem, tds)
    }

    #[test]
    fn test_animated_scene_frames() {
        let (points, dem, tds) = synthetic_survey();

        let figure = AnimatedSceneBuilder::new()
            .with_survey(SurveyInput {
                points: &points,
                dem: &dem,
                tds: &tds,
            })
            .with_resolution(8)
            .with_levels(5)
            .build()
            .unwrap();

        assert_eq!(figure.n_frames(), 5);
        // 地表面 + 测点 + 初始切片
        assert_eq!(figure.n_traces(), 3);

        // 每帧轨迹数与初始画面一致
        for frame in &figure.frames {
            assert_eq!(frame.data.len(), 3);
            assert!(frame.layout.is_some());
        }

        // 帧名覆盖深度范围端点
        assert_eq!(figure.frames[0].name, "-150.0");
        assert_eq!(figure.frames[4].name, "-50.0");
    }

    #[test]
    fn test_animated_scene_controls() {
        let (points, dem, tds) = synthetic_survey();

        let figure = AnimatedSceneBuilder::new()
            .with_survey(SurveyInput {
                points: &points,
                dem: &dem,
                tds: &tds,
            })
            .with_resolution(8)
            .with_levels(3)
            .with_frame_ms(250)
            .build()
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&figure.to_json().unwrap()).unwrap();

        assert_eq!(json["layout"]["updatemenus"][0]["type"], "buttons");
        assert_eq!(
            json["layout"]["updatemenus"][0]["buttons"][0]["args"][1]["frame"]["duration"],
            250
        );
        assert_eq!(
            json["layout"]["sliders"][0]["steps"].as_array().unwrap().len(),
            3
        );
        assert_eq!(json["layout"]["title"]["font"]["size"], 44);
        // 帧布局携带深度标注
        assert_eq!(
            json["frames"][1]["layout"]["annotations"][0]["xref"],
            "paper"
        );
    }

    #[test]
    fn test_animated_scene_requires_levels() {
        let (points, dem, tds) = synthetic_survey();

        let result = AnimatedSceneBuilder::new()
            .with_survey(SurveyInput {
                points: &points,
                dem: &dem,
                tds: &tds,
            })
            .with_levels(1)
            .build();
        assert!(result.is_err());
    }
}
