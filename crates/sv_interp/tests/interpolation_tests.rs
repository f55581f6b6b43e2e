// crates/sv_interp/tests/interpolation_tests.rs

//! 插值器集成测试
//!
//! 在合成场上验证 2D/3D 插值器的关键性质：
//! 线性场再现、采样点精确性、数据支撑外返回缺测。

use sv_geo::{Point2D, Point3D};
use sv_interp::{GridAxis, TriangularInterpolator, VolumeInterpolator};

// ============================================================
// 2D 三角剖分插值
// ============================================================

/// 伪随机散点（固定种子的线性同余序列，保证测试可重复）
fn scattered_points(n: usize) -> Vec<Point2D> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n)
        .map(|_| Point2D::new(next() * 100.0, next() * 80.0))
        .collect()
}

#[test]
fn triangular_reproduces_linear_field_on_scatter() {
    let mut points = scattered_points(200);
    // 角点保证查询区域在凸包内
    points.push(Point2D::new(0.0, 0.0));
    points.push(Point2D::new(100.0, 0.0));
    points.push(Point2D::new(100.0, 80.0));
    points.push(Point2D::new(0.0, 80.0));

    let field = |x: f64, y: f64| 0.5 * x - 1.25 * y + 20.0;
    let values: Vec<f64> = points.iter().map(|p| field(p.x, p.y)).collect();

    let interp = TriangularInterpolator::new(points, values).unwrap();

    for &(x, y) in &[(10.0, 10.0), (50.0, 40.0), (90.0, 70.0), (33.3, 66.6)] {
        let v = interp.interpolate(x, y).unwrap();
        assert!(
            (v - field(x, y)).abs() < 1e-9,
            "linear field mismatch at ({x}, {y}): {v}"
        );
    }
}

#[test]
fn triangular_grid_covers_hull_and_marks_outside() {
    let points = vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(10.0, 0.0),
        Point2D::new(10.0, 10.0),
        Point2D::new(0.0, 10.0),
    ];
    let values = vec![1.0, 2.0, 3.0, 4.0];
    let interp = TriangularInterpolator::new(points, values).unwrap();

    // 网格范围大于凸包
    let x_axis = GridAxis::linspace(-5.0, 15.0, 21).unwrap();
    let y_axis = GridAxis::linspace(-5.0, 15.0, 21).unwrap();
    let grid = interp.interpolate_grid(&x_axis, &y_axis).unwrap();

    assert_eq!(grid.nrows(), 21);
    assert_eq!(grid.ncols(), 21);

    // 凸包外全为 NaN
    assert!(grid.get(0, 0).is_nan());
    assert!(grid.get(20, 20).is_nan());

    // 凸包内有限且在采样值范围内
    let inside = grid.get(10, 10);
    assert!(inside.is_finite());
    assert!((1.0..=4.0).contains(&inside));

    // 有限单元数量: 凸包为 [0,10]² 对应 11×11 子网格
    assert_eq!(grid.count_finite(), 121);
}

// ============================================================
// 3D 局部线性插值
// ============================================================

/// 类测区采样: 水平公里级、垂向百米级
fn survey_lattice() -> (Vec<Point3D>, Vec<f64>) {
    let field = |x: f64, y: f64, z: f64| 1e-4 * x - 2e-4 * y + 3.0e-2 * z + 1500.0;
    let mut points = Vec::new();
    let mut values = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            for k in 0..8 {
                let x = i as f64 * 5_000.0;
                let y = j as f64 * 5_000.0;
                let z = k as f64 * 60.0 - 400.0;
                points.push(Point3D::new(x, y, z));
                values.push(field(x, y, z));
            }
        }
    }
    (points, values)
}

#[test]
fn volume_reproduces_linear_field_in_anisotropic_domain() {
    let (points, values) = survey_lattice();
    let field = |x: f64, y: f64, z: f64| 1e-4 * x - 2e-4 * y + 3.0e-2 * z + 1500.0;

    let interp = VolumeInterpolator::new(points, values).unwrap();

    for &(x, y, z) in &[
        (17_500.0, 12_500.0, -100.0),
        (2_500.0, 32_500.0, -250.0),
        (30_000.0, 20_000.0, -40.0),
    ] {
        let v = interp.interpolate(&Point3D::new(x, y, z)).unwrap();
        let expected = field(x, y, z);
        assert!(
            (v - expected).abs() < 1e-5 * expected.abs(),
            "at ({x}, {y}, {z}): {v} vs {expected}"
        );
    }
}

#[test]
fn volume_slices_are_consistent_with_point_queries() {
    let (points, values) = survey_lattice();
    let interp = VolumeInterpolator::new(points, values).unwrap();

    let x_axis = GridAxis::linspace(0.0, 35_000.0, 15).unwrap();
    let y_axis = GridAxis::linspace(0.0, 35_000.0, 15).unwrap();
    let slice = interp.horizontal_slice(&x_axis, &y_axis, -100.0).unwrap();

    // 切片单元与单点查询一致
    let x = x_axis.values()[7];
    let y = y_axis.values()[3];
    let from_slice = slice.get(3, 7);
    let from_query = interp
        .interpolate(&Point3D::new(x, y, -100.0))
        .unwrap_or(f64::NAN);
    assert!((from_slice - from_query).abs() < 1e-12);
}

#[test]
fn volume_returns_none_far_from_data() {
    let (points, values) = survey_lattice();
    let interp = VolumeInterpolator::new(points, values).unwrap();

    assert!(interp
        .interpolate(&Point3D::new(500_000.0, 0.0, -100.0))
        .is_none());
    assert!(interp
        .interpolate(&Point3D::new(17_500.0, 17_500.0, 5_000.0))
        .is_none());
}

#[test]
fn volume_all_nan_slice_is_allowed() {
    let (points, values) = survey_lattice();
    let interp = VolumeInterpolator::new(points, values).unwrap();

    // 远离测区的切片: 全部缺测, 不报错
    let x_axis = GridAxis::linspace(900_000.0, 950_000.0, 4).unwrap();
    let y_axis = GridAxis::linspace(900_000.0, 950_000.0, 4).unwrap();
    let slice = interp.horizontal_slice(&x_axis, &y_axis, -100.0).unwrap();

    assert_eq!(slice.count_finite(), 0);
}
