//! Planes with a 2D index parametrization
//!
//! A [`PlaneGeometry`] is a [`BaseGeometry`] whose bounds are `(0, w, 0, h, 0, 1)`.
//! Column 0 of the index-to-world matrix is the in-plane *right* axis, column 1
//! the *down* axis and column 2 the normal. The normal is not normalised: its
//! length is the spacing along the third index axis.
//!
//! A plane may point back at the grid it was cut from via a non-owning
//! reference (see [`PlaneGeometry::set_reference_geometry`]).

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::{Arc, Weak};

use crate::base_geometry::{BaseGeometry, BoundsArray};
use crate::error::{Error, Result};
use crate::grid_geometry::GridGeometry;
use crate::line::{IntersectionPair, Line3D};
use crate::numeric::{EPS, Point2D, Point3D, SQRT_EPS, Vector2D, Vector3D};
use crate::transform::AffineTransform3D;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard view direction of a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlaneOrientation {
    /// Normal along z; right along x, down along y
    #[default]
    Axial,
    /// Normal along y; right along x, down along z
    Frontal,
    /// Normal along x; right along y, down along z
    Sagittal,
}

/// Flags for [`PlaneGeometry::standard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StandardPlaneOptions {
    /// View from the front (`true`) or mirrored from the back
    pub frontside: bool,
    /// Rotate the in-plane axes by 180 degrees
    pub rotated: bool,
    /// Normal points along the positive axis (`true`) or the negative one
    pub top: bool,
}

impl Default for StandardPlaneOptions {
    fn default() -> Self {
        Self {
            frontside: true,
            rotated: false,
            top: true,
        }
    }
}

impl StandardPlaneOptions {
    /// Default options: frontside, not rotated, normal along the positive axis
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frontside flag
    pub fn with_frontside(mut self, frontside: bool) -> Self {
        self.frontside = frontside;
        self
    }

    /// Set the rotated flag
    pub fn with_rotated(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    /// Set the top flag
    pub fn with_top(mut self, top: bool) -> Self {
        self.top = top;
        self
    }
}

/// A bounded plane in world space
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneGeometry {
    base: BaseGeometry,
    #[cfg_attr(feature = "serde", serde(skip))]
    reference: Option<Weak<GridGeometry>>,
}

impl PartialEq for PlaneGeometry {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

fn unit(vector: &Vector3D, what: &str) -> Result<Vector3D> {
    let norm = vector.norm();
    if norm < EPS {
        return Err(Error::degenerate_vector(what, norm));
    }
    Ok(vector / norm)
}

fn check_extents(width: f64, height: f64) -> Result<()> {
    if !(width > 0.0) {
        return Err(Error::invalid_extent(0, width));
    }
    if !(height > 0.0) {
        return Err(Error::invalid_extent(1, height));
    }
    Ok(())
}

fn angle_between(a: &Vector3D, b: &Vector3D) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator <= 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos()
}

impl PlaneGeometry {
    fn from_base(base: BaseGeometry) -> Self {
        Self {
            base,
            reference: None,
        }
    }

    /// Create a unit plane through `origin` perpendicular to `normal`
    ///
    /// The in-plane right axis is chosen perpendicular to `normal` inside the
    /// xy-plane when `normal.y != 0`, and along y otherwise; down completes the
    /// frame as `normal x right`. Width, height and spacing are all 1.
    ///
    /// # Errors
    /// [`Error::DegenerateVector`] if `normal` has zero length.
    ///
    /// # Example
    /// ```
    /// use slice_bounds::{PlaneGeometry, Point3D, Vector3D};
    ///
    /// let plane = PlaneGeometry::from_origin_normal(Point3D::new(0.0, 0.0, 3.0), Vector3D::new(0.0, 0.0, 2.0)).unwrap();
    /// assert_eq!(plane.normal_unit(), Vector3D::new(0.0, 0.0, 1.0));
    /// assert!((plane.signed_distance(&Point3D::new(7.0, -1.0, 5.0)) - 2.0).abs() < 1e-12);
    /// ```
    pub fn from_origin_normal(origin: Point3D, normal: Vector3D) -> Result<Self> {
        let normal = unit(&normal, "plane normal")?;
        let right = if normal.y.abs() > EPS {
            Vector3D::new(1.0, -normal.x / normal.y, 0.0).normalize()
        } else {
            Vector3D::new(0.0, 1.0, 0.0)
        };
        let down = normal.cross(&right).normalize();

        let mut plane = Self::from_vectors(1.0, 1.0, &right, &down, None)?;
        plane.set_origin(origin);
        Ok(plane)
    }

    /// Create a `width x height` plane at the world origin spanned by `right` and `down`
    ///
    /// The axes are normalised and then scaled by `spacing` (default `(1, 1, 1)`);
    /// the normal is `right x down`, normalised and scaled by `spacing.z`.
    ///
    /// # Errors
    /// [`Error::DegenerateVector`] for zero-length or parallel axes,
    /// [`Error::InvalidBounds`] for non-positive extents and
    /// [`Error::SingularTransform`] for a zero spacing component.
    pub fn from_vectors(
        width: f64,
        height: f64,
        right: &Vector3D,
        down: &Vector3D,
        spacing: Option<Vector3D>,
    ) -> Result<Self> {
        check_extents(width, height)?;
        let spacing = spacing.unwrap_or_else(|| Vector3D::repeat(1.0));
        let right_unit = unit(right, "right axis")?;
        let down_unit = unit(down, "down axis")?;
        let normal = unit(&right.cross(down), "plane normal")?;

        let transform = AffineTransform3D::from_columns(
            [
                right_unit * spacing.x,
                down_unit * spacing.y,
                normal * spacing.z,
            ],
            Vector3D::zeros(),
        );
        let base = BaseGeometry::new(transform, [0.0, width, 0.0, height, 0.0, 1.0])?;
        Ok(Self::from_base(base))
    }

    /// Create a standard axial, frontal or sagittal plane
    ///
    /// `width`, `height` and `z_position` are in index units of a grid with the
    /// given `spacing`; `z_position` is the slice along the normal axis.
    pub fn standard(
        orientation: PlaneOrientation,
        width: f64,
        height: f64,
        spacing: Vector3D,
        z_position: f64,
        options: StandardPlaneOptions,
    ) -> Result<Self> {
        check_extents(width, height)?;
        let (w, h, z) = (width, height, z_position);
        let x = Vector3D::x();
        let y = Vector3D::y();
        let zv = Vector3D::z();

        let (normal_axis, origin, right, down) = match (orientation, options.frontside, options.rotated) {
            (PlaneOrientation::Axial, true, false) => (2, Point3D::new(0.0, 0.0, z), x, y),
            (PlaneOrientation::Axial, true, true) => (2, Point3D::new(w, h, z), -x, -y),
            (PlaneOrientation::Axial, false, false) => (2, Point3D::new(w, 0.0, z), -x, y),
            (PlaneOrientation::Axial, false, true) => (2, Point3D::new(0.0, h, z), x, -y),
            (PlaneOrientation::Frontal, true, false) => (1, Point3D::new(0.0, z, 0.0), x, zv),
            (PlaneOrientation::Frontal, true, true) => (1, Point3D::new(w, z, h), -x, -zv),
            (PlaneOrientation::Frontal, false, false) => (1, Point3D::new(w, z, 0.0), -x, zv),
            (PlaneOrientation::Frontal, false, true) => (1, Point3D::new(0.0, z, h), x, -zv),
            (PlaneOrientation::Sagittal, true, false) => (0, Point3D::new(z, 0.0, 0.0), y, zv),
            (PlaneOrientation::Sagittal, true, true) => (0, Point3D::new(z, w, h), -y, -zv),
            (PlaneOrientation::Sagittal, false, false) => (0, Point3D::new(z, w, 0.0), -y, zv),
            (PlaneOrientation::Sagittal, false, true) => (0, Point3D::new(z, 0.0, h), y, -zv),
        };
        let mut normal = Vector3D::zeros();
        normal[normal_axis] = if options.top { 1.0 } else { -1.0 };

        let scale = AffineTransform3D::from_diagonal(spacing, Vector3D::zeros());
        let transform = AffineTransform3D::from_columns(
            [
                scale.transform_vector(&right),
                scale.transform_vector(&down),
                scale.transform_vector(&normal),
            ],
            scale.transform_point(&origin).coords,
        );
        let base = BaseGeometry::new(transform, [0.0, width, 0.0, height, 0.0, 1.0])?;
        Ok(Self::from_base(base))
    }

    /// The shared index/world state
    pub fn base(&self) -> &BaseGeometry {
        &self.base
    }

    /// World position of the plane origin
    pub fn origin(&self) -> Point3D {
        self.base.origin()
    }

    /// Move the plane origin
    pub fn set_origin(&mut self, origin: Point3D) {
        self.base.set_origin(origin);
    }

    /// Voxel size along the right, down and normal axes
    pub fn spacing(&self) -> Vector3D {
        self.base.spacing()
    }

    /// Rescale the axes, keeping their directions
    pub fn set_spacing(&mut self, spacing: Vector3D) -> Result<()> {
        self.base.set_spacing(spacing)
    }

    /// Replace the index bounds
    pub fn set_bounds(&mut self, bounds: BoundsArray) -> Result<()> {
        self.base.set_bounds(bounds)
    }

    /// Switch between centre-based and corner-based origin
    pub fn set_image_geometry(&mut self, image_geometry: bool) {
        self.base.set_image_geometry(image_geometry);
    }

    /// The index-to-world transform
    pub fn index_to_world_transform(&self) -> &AffineTransform3D {
        self.base.index_to_world_transform()
    }

    /// Width in index units
    pub fn width(&self) -> f64 {
        self.base.extent(0)
    }

    /// Height in index units
    pub fn height(&self) -> f64 {
        self.base.extent(1)
    }

    /// The plane normal, not normalised
    pub fn normal(&self) -> Vector3D {
        self.base.index_to_world_transform().column(2)
    }

    /// The plane normal with unit length
    pub fn normal_unit(&self) -> Vector3D {
        // the transform is invertible, so the normal column is never zero
        self.normal().normalize()
    }

    /// Signed distance `n . (point - origin) / |n|`
    pub fn signed_distance(&self, point: &Point3D) -> f64 {
        self.normal_unit().dot(&(point - self.origin()))
    }

    /// Unsigned distance from `point` to the (infinite) plane
    pub fn distance(&self, point: &Point3D) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Whether `point` lies on the normal side of the plane
    ///
    /// With `consider_bounding_box` the point is compared against the lower
    /// z bound in index space instead of the plane itself.
    pub fn is_above(&self, point: &Point3D, consider_bounding_box: bool) -> bool {
        if consider_bounding_box {
            self.base.world_to_index(point).z > self.base.bounds()[4]
        } else {
            self.signed_distance(point) > 0.0
        }
    }

    /// Where `line` crosses the plane
    ///
    /// Returns `None` when the line is parallel to the plane within [`EPS`],
    /// including the case where it lies inside it; check [`distance`](Self::distance)
    /// to tell the two apart.
    pub fn intersection_point(&self, line: &Line3D) -> Option<Point3D> {
        let normal = self.normal_unit();
        let direction = line.direction().try_normalize(0.0)?;
        let denominator = normal.dot(&direction);
        if denominator.abs() < EPS {
            return None;
        }
        let t = normal.dot(&(self.origin() - line.point())) / denominator;
        Some(line.point() + direction * t)
    }

    /// Line parameter `t` of the crossing, so the hit is `line.point_at(t)`
    ///
    /// Uses the un-normalised normal and direction, so a segment built with
    /// [`Line3D::from_points`] crosses the plane between its ends iff `t` is in `[0, 1]`.
    pub fn intersection_point_param(&self, line: &Line3D) -> Option<f64> {
        let normal = self.normal();
        let denominator = normal.dot(&line.direction());
        if denominator.abs() < EPS {
            return None;
        }
        Some(normal.dot(&(self.origin() - line.point())) / denominator)
    }

    /// The line along which this plane and `other` meet, `None` if they are parallel
    pub fn intersection_line(&self, other: &PlaneGeometry) -> Option<Line3D> {
        let n1 = self.normal_unit();
        let n2 = other.normal_unit();
        let direction = n1.cross(&n2);
        if direction.norm_squared() < EPS {
            return None;
        }

        let n1_dot_n2 = n1.dot(&n2);
        let determinant = 1.0 - n1_dot_n2 * n1_dot_n2;
        let d1 = n1.dot(&self.origin().coords);
        let d2 = n2.dot(&other.origin().coords);
        let c1 = (d1 - d2 * n1_dot_n2) / determinant;
        let c2 = (d2 - d1 * n1_dot_n2) / determinant;

        Some(Line3D::new(Point3D::from(n1 * c1 + n2 * c2), direction))
    }

    /// Clip the crossline with `other` to this plane's rectangle, in 2D mm
    pub fn intersect_with_plane_2d(&self, other: &PlaneGeometry) -> IntersectionPair<Point2D> {
        let Some(crossline) = self.intersection_line(other) else {
            return IntersectionPair::default();
        };
        let (point, _) = self.map(&crossline.point());
        let direction = self.map_vector(&crossline.direction());
        Line3D::rectangle_line_intersection(
            0.0,
            0.0,
            self.base.extent_in_mm(0),
            self.base.extent_in_mm(1),
            &point,
            &direction,
        )
    }

    /// Angle between the two normals, in `[0, pi]`
    pub fn angle_to_plane(&self, other: &PlaneGeometry) -> f64 {
        angle_between(&self.normal(), &other.normal())
    }

    /// Angle between `line` and the plane, in `[-pi/2, pi/2]`
    pub fn angle_to_line(&self, line: &Line3D) -> f64 {
        FRAC_PI_2 - angle_between(&line.direction(), &self.normal())
    }

    /// Whether the normals are parallel or anti-parallel
    pub fn is_parallel(&self, other: &PlaneGeometry) -> bool {
        let angle = self.angle_to_plane(other);
        angle < 10.0 * SQRT_EPS || angle > PI - 10.0 * SQRT_EPS
    }

    /// Whether `point` lies on the plane within [`EPS`]
    pub fn is_on_plane_point(&self, point: &Point3D) -> bool {
        self.distance(point) < EPS
    }

    /// Whether both ends of `line` lie on the plane
    pub fn is_on_plane_line(&self, line: &Line3D) -> bool {
        self.is_on_plane_point(&line.point1()) && self.is_on_plane_point(&line.point2())
    }

    /// Whether `other` is parallel to this plane and its origin lies on it
    pub fn is_on_plane_plane(&self, other: &PlaneGeometry) -> bool {
        self.is_parallel(other) && self.is_on_plane_point(&other.origin())
    }

    /// Orthogonal projection of `point` onto the plane
    pub fn project_point_onto_plane(&self, point: &Point3D) -> Point3D {
        point - self.normal_unit() * self.signed_distance(point)
    }

    fn inside_rectangle(&self, index: &Point3D) -> bool {
        let b = self.base.bounds();
        (0..3).all(|axis| index[axis] >= b[2 * axis] && index[axis] <= b[2 * axis + 1])
    }

    /// Map a world point into the plane's 2D mm parametrization
    ///
    /// The flag tells whether the projection falls inside the plane rectangle.
    pub fn map(&self, point: &Point3D) -> (Point2D, bool) {
        let mut index = self.base.world_to_index(point);
        let spacing = self.spacing();
        let mapped = Point2D::new(index.x * spacing.x, index.y * spacing.y);
        index.z = 0.0;
        (mapped, self.inside_rectangle(&index))
    }

    /// Map a 2D mm position back onto the plane in world space
    pub fn map_to_world(&self, point: &Point2D) -> Point3D {
        let spacing = self.spacing();
        self.base
            .index_to_world(&Point3D::new(point.x / spacing.x, point.y / spacing.y, 0.0))
    }

    /// Map a world vector into the plane's 2D mm parametrization
    pub fn map_vector(&self, vector: &Vector3D) -> Vector2D {
        let index = self.base.world_to_index_vector(vector);
        let spacing = self.spacing();
        Vector2D::new(index.x * spacing.x, index.y * spacing.y)
    }

    /// Project `point` onto the plane along the third index axis
    ///
    /// The flag tells whether the result falls inside the plane rectangle.
    pub fn project(&self, point: &Point3D) -> (Point3D, bool) {
        let mut index = self.base.world_to_index(point);
        index.z = 0.0;
        (self.base.index_to_world(&index), self.inside_rectangle(&index))
    }

    /// Convert 2D index units to 2D mm
    pub fn index_to_world_2d(&self, point: &Point2D) -> Point2D {
        let spacing = self.spacing();
        Point2D::new(point.x * spacing.x, point.y * spacing.y)
    }

    /// Convert 2D mm to 2D index units
    pub fn world_to_index_2d(&self, point: &Point2D) -> Point2D {
        let spacing = self.spacing();
        Point2D::new(point.x / spacing.x, point.y / spacing.y)
    }

    /// Remember the grid this plane belongs to without keeping it alive
    pub fn set_reference_geometry(&mut self, grid: &Arc<GridGeometry>) {
        self.reference = Some(Arc::downgrade(grid));
    }

    /// Forget the reference grid
    pub fn clear_reference_geometry(&mut self) {
        self.reference = None;
    }

    /// The reference grid, if one was set and is still alive
    pub fn reference_geometry(&self) -> Option<Arc<GridGeometry>> {
        self.reference.as_ref().and_then(Weak::upgrade)
    }

    /// Whether a live reference grid is set
    pub fn has_reference_geometry(&self) -> bool {
        self.reference_geometry().is_some()
    }

    /// The same plane moved by a world-space transform
    pub fn transformed(&self, world: &AffineTransform3D) -> Result<Self> {
        Ok(Self {
            base: self.base.transformed(world)?,
            reference: self.reference.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axial_at(z: f64) -> PlaneGeometry {
        PlaneGeometry::from_origin_normal(Point3D::new(0.0, 0.0, z), Vector3D::z()).unwrap()
    }

    #[test]
    fn test_from_origin_normal_frame() {
        let plane =
            PlaneGeometry::from_origin_normal(Point3D::new(511.0, 0.0, 0.0), Vector3D::z()).unwrap();
        let t = plane.index_to_world_transform();
        assert_relative_eq!(t.column(0), Vector3D::new(0.0, 1.0, 0.0));
        assert_relative_eq!(t.column(1), Vector3D::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(t.column(2), Vector3D::new(0.0, 0.0, 1.0));
        assert_eq!(plane.width(), 1.0);
        assert_eq!(plane.origin(), Point3D::new(511.0, 0.0, 0.0));
    }

    #[test]
    fn test_nearly_zero_normal_y_uses_exact_zero_frame() {
        let exact = PlaneGeometry::from_origin_normal(Point3D::origin(), Vector3D::x()).unwrap();
        let nearly = PlaneGeometry::from_origin_normal(Point3D::origin(), Vector3D::new(1.0, 1e-16, 0.0))
            .unwrap();
        assert_relative_eq!(nearly.index_to_world_transform().column(0), Vector3D::new(0.0, 1.0, 0.0));
        for axis in 0..3 {
            assert_relative_eq!(
                nearly.index_to_world_transform().column(axis),
                exact.index_to_world_transform().column(axis),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_from_origin_normal_keeps_normal_direction() {
        let normal = Vector3D::new(1.0, -1.0, 1.0);
        let plane = PlaneGeometry::from_origin_normal(Point3D::origin(), normal).unwrap();
        assert_relative_eq!(plane.normal_unit(), normal.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_normal_rejected() {
        let result = PlaneGeometry::from_origin_normal(Point3D::origin(), Vector3D::zeros());
        assert!(matches!(result, Err(Error::DegenerateVector(_))));
    }

    #[test]
    fn test_from_vectors_rejects_parallel_axes() {
        let result = PlaneGeometry::from_vectors(2.0, 2.0, &Vector3D::x(), &(Vector3D::x() * 3.0), None);
        assert!(matches!(result, Err(Error::DegenerateVector(_))));
        let result = PlaneGeometry::from_vectors(0.0, 2.0, &Vector3D::x(), &Vector3D::y(), None);
        assert!(matches!(result, Err(Error::InvalidBounds(_))));
    }

    #[test]
    fn test_from_vectors_scales_by_spacing() {
        let plane = PlaneGeometry::from_vectors(
            10.0,
            20.0,
            &Vector3D::new(3.0, 0.0, 0.0),
            &Vector3D::new(0.0, 5.0, 0.0),
            Some(Vector3D::new(0.5, 2.0, 4.0)),
        )
        .unwrap();
        assert_eq!(plane.spacing(), Vector3D::new(0.5, 2.0, 4.0));
        assert_eq!(plane.normal(), Vector3D::new(0.0, 0.0, 4.0));
        assert_eq!(plane.base().extent_in_mm(1), 40.0);
    }

    #[test]
    fn test_standard_axial_rotated() {
        let plane = PlaneGeometry::standard(
            PlaneOrientation::Axial,
            100.0,
            50.0,
            Vector3D::new(1.0, 2.0, 3.0),
            4.0,
            StandardPlaneOptions::new().with_rotated(true),
        )
        .unwrap();
        assert_eq!(plane.origin(), Point3D::new(100.0, 100.0, 12.0));
        assert_eq!(plane.index_to_world_transform().column(0), Vector3D::new(-1.0, 0.0, 0.0));
        assert_eq!(plane.index_to_world_transform().column(1), Vector3D::new(0.0, -2.0, 0.0));
        assert_eq!(plane.normal(), Vector3D::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_standard_sagittal_and_frontal() {
        let sagittal = PlaneGeometry::standard(
            PlaneOrientation::Sagittal,
            30.0,
            40.0,
            Vector3D::repeat(1.0),
            7.0,
            StandardPlaneOptions::new().with_frontside(false).with_top(false),
        )
        .unwrap();
        assert_eq!(sagittal.origin(), Point3D::new(7.0, 30.0, 0.0));
        assert_eq!(sagittal.normal(), Vector3D::new(-1.0, 0.0, 0.0));

        let frontal = PlaneGeometry::standard(
            PlaneOrientation::Frontal,
            30.0,
            40.0,
            Vector3D::repeat(1.0),
            2.0,
            StandardPlaneOptions::default(),
        )
        .unwrap();
        assert_eq!(frontal.origin(), Point3D::new(0.0, 2.0, 0.0));
        assert_eq!(frontal.index_to_world_transform().column(1), Vector3D::z());
        assert_eq!(frontal.normal(), Vector3D::y());
    }

    #[test]
    fn test_distances_and_is_above() {
        let plane = axial_at(3.0);
        assert_relative_eq!(plane.signed_distance(&Point3D::new(4.0, 4.0, 1.0)), -2.0);
        assert_relative_eq!(plane.distance(&Point3D::new(4.0, 4.0, 1.0)), 2.0);
        assert!(plane.is_above(&Point3D::new(0.0, 0.0, 3.5), false));
        assert!(!plane.is_above(&Point3D::new(0.0, 0.0, 2.5), true));
    }

    #[test]
    fn test_intersection_point_and_param() {
        let plane = axial_at(3.0);
        let line = Line3D::from_points(Point3D::new(1.0, 2.0, 0.0), Point3D::new(1.0, 2.0, 12.0));
        assert_relative_eq!(plane.intersection_point(&line).unwrap(), Point3D::new(1.0, 2.0, 3.0));
        assert_relative_eq!(plane.intersection_point_param(&line).unwrap(), 0.25);
    }

    #[test]
    fn test_intersection_rejects_parallel_line() {
        let plane = axial_at(3.0);
        let inside = Line3D::new(Point3D::new(0.0, 0.0, 3.0), Vector3D::x());
        assert!(plane.intersection_point(&inside).is_none());
        assert!(plane.intersection_point_param(&inside).is_none());
        assert!(plane.is_on_plane_line(&inside));
        let degenerate = Line3D::new(Point3D::new(0.0, 0.0, 3.0), Vector3D::zeros());
        assert!(plane.intersection_point(&degenerate).is_none());
    }

    #[test]
    fn test_intersection_line() {
        let axial = axial_at(3.0);
        let sagittal = PlaneGeometry::from_origin_normal(Point3D::new(5.0, 0.0, 0.0), Vector3D::x()).unwrap();
        let crossline = axial.intersection_line(&sagittal).unwrap();
        assert!(crossline.is_parallel(&Line3D::new(Point3D::origin(), Vector3D::y())));
        assert!(axial.is_on_plane_point(&crossline.point()));
        assert!(sagittal.is_on_plane_point(&crossline.point()));
        assert!(axial.intersection_line(&axial_at(9.0)).is_none());
    }

    #[test]
    fn test_intersect_with_plane_2d() {
        let axial = PlaneGeometry::from_vectors(10.0, 10.0, &Vector3D::x(), &Vector3D::y(), None).unwrap();
        let cut = PlaneGeometry::from_origin_normal(Point3D::new(4.0, 0.0, 0.0), Vector3D::x()).unwrap();
        let hits = axial.intersect_with_plane_2d(&cut);
        assert_eq!(hits.count(), 2);
        for hit in hits.iter() {
            assert_relative_eq!(hit.x, 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parallel_and_angles() {
        let a = axial_at(0.0);
        let flipped = PlaneGeometry::from_origin_normal(Point3D::new(0.0, 0.0, 0.0), -Vector3D::z()).unwrap();
        assert!(a.is_parallel(&flipped));
        assert!(a.is_on_plane_plane(&flipped));
        assert!(!a.is_on_plane_plane(&axial_at(1.0)));
        let tilted = PlaneGeometry::from_origin_normal(Point3D::origin(), Vector3D::new(0.0, 1.0, 1.0)).unwrap();
        assert_relative_eq!(a.angle_to_plane(&tilted), PI / 4.0, epsilon = 1e-12);
        let vertical = Line3D::new(Point3D::origin(), Vector3D::z());
        assert_relative_eq!(a.angle_to_line(&vertical), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_and_map() {
        let plane = PlaneGeometry::from_vectors(
            10.0,
            10.0,
            &Vector3D::x(),
            &Vector3D::y(),
            Some(Vector3D::new(2.0, 2.0, 1.0)),
        )
        .unwrap();
        let point = Point3D::new(4.0, 6.0, 5.0);
        assert_relative_eq!(plane.project_point_onto_plane(&point), Point3D::new(4.0, 6.0, 0.0));

        let (mapped, inside) = plane.map(&point);
        assert!(inside);
        assert_relative_eq!(mapped, Point2D::new(4.0, 6.0));
        assert_relative_eq!(plane.map_to_world(&mapped), Point3D::new(4.0, 6.0, 0.0));

        let (projected, inside) = plane.project(&Point3D::new(30.0, 6.0, -2.0));
        assert!(!inside);
        assert_relative_eq!(projected, Point3D::new(30.0, 6.0, 0.0));

        assert_relative_eq!(plane.index_to_world_2d(&Point2D::new(1.0, 3.0)), Point2D::new(2.0, 6.0));
        assert_relative_eq!(plane.world_to_index_2d(&Point2D::new(2.0, 6.0)), Point2D::new(1.0, 3.0));
    }

    #[test]
    fn test_reference_geometry_is_weak() {
        let grid = Arc::new(
            GridGeometry::new(Point3D::origin(), Vector3D::repeat(1.0), [4, 4, 4]).unwrap(),
        );
        let mut plane = axial_at(1.0);
        assert!(!plane.has_reference_geometry());
        plane.set_reference_geometry(&grid);
        assert!(plane.has_reference_geometry());
        assert_eq!(Arc::strong_count(&grid), 1);
        drop(grid);
        assert!(plane.reference_geometry().is_none());
    }

    #[test]
    fn test_transformed_plane() {
        let plane = axial_at(2.0);
        let shift = AffineTransform3D::new(nalgebra::Matrix3::identity(), Vector3D::new(0.0, 0.0, 5.0));
        let moved = plane.transformed(&shift).unwrap();
        assert_relative_eq!(moved.origin(), Point3D::new(0.0, 0.0, 7.0));
        assert_relative_eq!(moved.normal(), plane.normal());
    }
}
