#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;
use slice_bounds::{
    ClippedSurfaceBoundsCalculator, GridGeometry, PlaneGeometry, Point3D, SENTINEL, Vector3D,
};

#[derive(Debug)]
struct FuzzInput {
    origin: (f64, f64, f64),
    spacing: (f64, f64, f64),
    dimensions: [u32; 3],
    image_geometry: bool,
    plane_origin: (f64, f64, f64),
    plane_normal: (f64, f64, f64),
    points: Vec<(f64, f64, f64)>,
}

impl<'a> Arbitrary<'a> for FuzzInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        // Keep dimensions small enough that `dimension - 1` stays meaningful
        let dimensions = [
            u.int_in_range(1..=4096)?,
            u.int_in_range(1..=4096)?,
            u.int_in_range(1..=4096)?,
        ];
        let point_count = u.int_in_range(0..=64)?;
        let mut points = Vec::with_capacity(point_count);
        for _ in 0..point_count {
            points.push((u.arbitrary()?, u.arbitrary()?, u.arbitrary()?));
        }
        Ok(FuzzInput {
            origin: (u.arbitrary()?, u.arbitrary()?, u.arbitrary()?),
            spacing: (u.arbitrary()?, u.arbitrary()?, u.arbitrary()?),
            dimensions,
            image_geometry: u.arbitrary()?,
            plane_origin: (u.arbitrary()?, u.arbitrary()?, u.arbitrary()?),
            plane_normal: (u.arbitrary()?, u.arbitrary()?, u.arbitrary()?),
            points,
        })
    }
}

fn finite(v: (f64, f64, f64)) -> Option<Vector3D> {
    (v.0.is_finite() && v.1.is_finite() && v.2.is_finite()).then(|| Vector3D::new(v.0, v.1, v.2))
}

fn check_output(calculator: &ClippedSurfaceBoundsCalculator, dimensions: [u32; 3]) {
    for (range, dim) in calculator.output().iter().zip(dimensions) {
        if *range == SENTINEL {
            continue;
        }
        assert!(range.0 >= 0 && range.0 <= range.1 && range.1 < dim as i32);
    }
}

fuzz_target!(|input: FuzzInput| {
    // NaN and infinite inputs are not guarded by the library
    let (Some(origin), Some(spacing)) = (finite(input.origin), finite(input.spacing)) else {
        return;
    };
    let Ok(mut grid) = GridGeometry::new(Point3D::from(origin), spacing, input.dimensions) else {
        return;
    };
    grid.set_image_geometry(input.image_geometry);

    let mut calculator = ClippedSurfaceBoundsCalculator::new();

    if let (Some(plane_origin), Some(normal)) = (finite(input.plane_origin), finite(input.plane_normal)) {
        if let Ok(plane) = PlaneGeometry::from_origin_normal(Point3D::from(plane_origin), normal) {
            calculator.set_plane(&plane, &grid);
            calculator.update();
            check_output(&calculator, input.dimensions);
        }
    }

    let points: Vec<Point3D> = input
        .points
        .iter()
        .filter_map(|&p| finite(p).map(Point3D::from))
        .collect();
    calculator.set_points(&points, &grid);
    calculator.update();
    check_output(&calculator, input.dimensions);
});
