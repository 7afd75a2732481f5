//! Integration tests for planes, lines and sliced geometries working together

use approx::assert_relative_eq;
use slice_bounds::{
    GridGeometry, Line3D, PlaneGeometry, PlaneOrientation, Point2D, Point3D, SlicedGeometry,
    StandardPlaneOptions, Vector3D,
};

#[test]
fn test_standard_planes_of_a_grid_are_on_grid_slices() {
    let spacing = Vector3D::new(0.5, 0.5, 2.0);
    let grid = GridGeometry::new(Point3D::origin(), spacing, [100, 80, 30]).unwrap();

    let axial = PlaneGeometry::standard(
        PlaneOrientation::Axial,
        100.0,
        80.0,
        spacing,
        7.0,
        StandardPlaneOptions::default(),
    )
    .unwrap();
    let index = grid.world_to_index(&axial.origin());
    assert_relative_eq!(index.z, 7.0);
    assert!(axial.is_parallel(
        &PlaneGeometry::from_origin_normal(Point3D::origin(), Vector3D::z()).unwrap()
    ));
    assert_relative_eq!(axial.base().extent_in_mm(0), 50.0);
    assert_relative_eq!(axial.base().extent_in_mm(1), 40.0);
}

#[test]
fn test_every_orientation_is_invertible() {
    let orientations = [PlaneOrientation::Axial, PlaneOrientation::Frontal, PlaneOrientation::Sagittal];
    for orientation in orientations {
        for flags in 0..8u8 {
            let options = StandardPlaneOptions::new()
                .with_frontside(flags & 1 != 0)
                .with_rotated(flags & 2 != 0)
                .with_top(flags & 4 != 0);
            let plane = PlaneGeometry::standard(orientation, 20.0, 10.0, Vector3D::repeat(1.0), 3.0, options)
                .unwrap();
            let corner = plane.base().corner_point(7).unwrap();
            assert_relative_eq!(
                plane.base().index_to_world(&plane.base().world_to_index(&corner)),
                corner,
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn test_map_round_trip_on_tilted_plane() {
    let plane = PlaneGeometry::from_vectors(
        30.0,
        20.0,
        &Vector3D::new(1.0, 1.0, 0.0),
        &Vector3D::new(0.0, 0.0, -1.0),
        Some(Vector3D::new(0.8, 1.2, 1.0)),
    )
    .unwrap();

    let point = plane.map_to_world(&Point2D::new(5.0, 7.0));
    assert!(plane.is_on_plane_point(&point));
    let (mapped, inside) = plane.map(&point);
    assert!(inside);
    assert_relative_eq!(mapped, Point2D::new(5.0, 7.0), epsilon = 1e-12);

    let off_plane = point + plane.normal_unit() * 3.0;
    assert_relative_eq!(plane.distance(&off_plane), 3.0, epsilon = 1e-12);
    assert_relative_eq!(plane.project_point_onto_plane(&off_plane), point, epsilon = 1e-12);
}

#[test]
fn test_line_through_two_planes_of_a_stack() {
    let base = PlaneGeometry::from_origin_normal(Point3D::origin(), Vector3D::z()).unwrap();
    let stack = SlicedGeometry::evenly_spaced_with_spacing(&base, 2.0, 10).unwrap();
    let line = Line3D::from_points(Point3D::new(1.0, 1.0, -1.0), Point3D::new(1.0, 1.0, 30.0));

    let first = stack.first_plane().intersection_point(&line).unwrap();
    let last = stack.last_plane().intersection_point(&line).unwrap();
    assert_relative_eq!(first, Point3D::new(1.0, 1.0, 0.0));
    assert_relative_eq!(last, Point3D::new(1.0, 1.0, 18.0));

    let t = stack.last_plane().intersection_point_param(&line).unwrap();
    assert_relative_eq!(line.point_at(t), last, epsilon = 1e-12);
}

#[test]
fn test_crossline_of_standard_planes() {
    let axial = PlaneGeometry::standard(
        PlaneOrientation::Axial,
        10.0,
        10.0,
        Vector3D::repeat(1.0),
        4.0,
        StandardPlaneOptions::default(),
    )
    .unwrap();
    let frontal = PlaneGeometry::standard(
        PlaneOrientation::Frontal,
        10.0,
        10.0,
        Vector3D::repeat(1.0),
        6.0,
        StandardPlaneOptions::default(),
    )
    .unwrap();

    let crossline = axial.intersection_line(&frontal).unwrap();
    assert!(crossline.is_parallel(&Line3D::new(Point3D::origin(), Vector3D::x())));
    assert_relative_eq!(crossline.point().y, 6.0, epsilon = 1e-12);
    assert_relative_eq!(crossline.point().z, 4.0, epsilon = 1e-12);

    let hits = axial.intersect_with_plane_2d(&frontal);
    assert_eq!(hits.count(), 2);
    let mut xs: Vec<f64> = hits.iter().map(|p| p.x).collect();
    xs.sort_by(f64::total_cmp);
    assert_relative_eq!(xs[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(xs[1], 10.0, epsilon = 1e-12);
}
