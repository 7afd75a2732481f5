//! Example computing which slices of a voxel grid a plane touches
//!
//! This example builds a 512x512x20 grid and asks the bounds calculator for
//! the index ranges cut by single planes, a pair of planes and a point list.

use slice_bounds::{
    ClippedSurfaceBoundsCalculator, GridGeometry, OutputType, PlaneGeometry, Point3D, SlicedGeometry,
    Vector3D, is_empty_range,
};

fn describe(range: OutputType) -> String {
    if is_empty_range(range) {
        "none".to_string()
    } else {
        format!("{}..={}", range.0, range.1)
    }
}

fn print_ranges(calculator: &ClippedSurfaceBoundsCalculator) {
    println!("    x: {}", describe(calculator.min_max_spatial_direction_x()));
    println!("    y: {}", describe(calculator.min_max_spatial_direction_y()));
    println!("    z: {}", describe(calculator.min_max_spatial_direction_z()));
}

fn main() -> slice_bounds::Result<()> {
    println!("=== Slice Range Example ===\n");

    let grid = GridGeometry::new(Point3D::origin(), Vector3D::new(1.0, 1.0, 2.0), [512, 512, 20])?;
    println!("Grid dimensions: {:?}, spacing: {:?}\n", grid.dimensions(), grid.spacing());

    let mut calculator = ClippedSurfaceBoundsCalculator::new();

    // Example 1: single planes
    println!("Example 1: Single Planes");
    let planes = [
        ("axial at z = 10", Point3D::new(0.0, 0.0, 10.0), Vector3D::z()),
        ("sagittal at x = 100", Point3D::new(100.0, 0.0, 0.0), Vector3D::x()),
        ("oblique", Point3D::new(256.0, 256.0, 20.0), Vector3D::new(1.0, -1.0, 4.0)),
        ("outside the grid", Point3D::new(0.0, 0.0, -50.0), Vector3D::z()),
    ];
    for (name, origin, normal) in planes {
        let plane = PlaneGeometry::from_origin_normal(origin, normal)?;
        calculator.set_plane(&plane, &grid);
        calculator.update();
        println!("  Plane {}:", name);
        print_ranges(&calculator);
    }
    println!();

    // Example 2: the first and last plane of a slice stack
    println!("Example 2: Plane Stack");
    let mut coronal = PlaneGeometry::from_origin_normal(Point3D::new(0.0, 40.0, 0.0), Vector3D::y())?;
    coronal.set_bounds([0.0, 512.0, 0.0, 40.0, 0.0, 1.0])?;
    let stack = SlicedGeometry::evenly_spaced(&coronal, 16)?;
    calculator.set_sliced_geometry(&stack, &grid);
    calculator.update();
    println!("  Stack of {} coronal slices:", stack.slices());
    print_ranges(&calculator);
    println!();

    // Example 3: a point list
    println!("Example 3: Point List");
    let points = [
        Point3D::new(12.0, 30.0, 4.0),
        Point3D::new(200.0, 15.0, 22.0),
        Point3D::new(600.0, 80.0, 9.0),
    ];
    calculator.set_points(&points, &grid);
    calculator.update();
    println!("  {} points (the last one outside the grid):", points.len());
    print_ranges(&calculator);

    Ok(())
}
