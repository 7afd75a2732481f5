//! Parametric 3D lines and line/box, line/rectangle intersection
//!
//! A [`Line3D`] is `point + t * direction`. The length of `direction` matters:
//! [`Line3D::point2`] and [`Line3D::is_part_of_straight_line`] treat the line as
//! the finite segment `t in [0, 1]`, while distances, projections and
//! intersections treat it as infinite.

use crate::numeric::{BOX_EPS, EPS, Point2D, Point3D, SQRT_EPS, Vector2D, Vector3D};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line through `point` along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line3D {
    point: Point3D,
    direction: Vector3D,
}

/// Up to two intersection points, in the order they were found
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPair<P> {
    points: [Option<P>; 2],
}

impl<P: Copy> IntersectionPair<P> {
    fn empty() -> Self {
        Self {
            points: [None, None],
        }
    }

    /// Number of points found (0, 1 or 2)
    pub fn count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// The first point found
    pub fn first(&self) -> Option<P> {
        self.points[0]
    }

    /// The second point found
    pub fn second(&self) -> Option<P> {
        self.points[1]
    }

    /// Iterate over the points found
    pub fn iter(&self) -> impl Iterator<Item = P> + '_ {
        self.points.iter().flatten().copied()
    }

    fn is_full(&self) -> bool {
        self.points[1].is_some()
    }

    /// Record `point` unless it coincides with a point already recorded
    fn push_distinct(&mut self, point: P, distance: impl Fn(&P, &P) -> f64) {
        if self.is_full() {
            return;
        }
        if let Some(first) = self.points[0] {
            if distance(&first, &point) < SQRT_EPS {
                return;
            }
            self.points[1] = Some(point);
        } else {
            self.points[0] = Some(point);
        }
    }
}

impl<P: Copy> Default for IntersectionPair<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for Line3D {
    fn default() -> Self {
        Self {
            point: Point3D::origin(),
            direction: Vector3D::zeros(),
        }
    }
}

impl Line3D {
    /// Create a line from a point and a direction
    pub fn new(point: Point3D, direction: Vector3D) -> Self {
        Self { point, direction }
    }

    /// Create the line (and segment) from `point1` to `point2`
    pub fn from_points(point1: Point3D, point2: Point3D) -> Self {
        Self {
            point: point1,
            direction: point2 - point1,
        }
    }

    /// The base point of the line
    pub fn point(&self) -> Point3D {
        self.point
    }

    /// The direction vector, including its length
    pub fn direction(&self) -> Vector3D {
        self.direction
    }

    /// Set the base point
    pub fn set_point(&mut self, point: Point3D) {
        self.point = point;
    }

    /// Set the direction vector
    pub fn set_direction(&mut self, direction: Vector3D) {
        self.direction = direction;
    }

    /// Set base point and direction from two points
    pub fn set_points(&mut self, point1: Point3D, point2: Point3D) {
        self.point = point1;
        self.direction = point2 - point1;
    }

    /// Start of the segment (`t = 0`)
    pub fn point1(&self) -> Point3D {
        self.point
    }

    /// End of the segment (`t = 1`)
    pub fn point2(&self) -> Point3D {
        self.point + self.direction
    }

    /// The point at parameter `t`
    ///
    /// # Example
    /// ```
    /// use slice_bounds::{Line3D, Point3D, Vector3D};
    ///
    /// let line = Line3D::new(Point3D::new(1.0, 0.0, 0.0), Vector3D::new(0.0, 2.0, 0.0));
    /// assert_eq!(line.point_at(0.5), Point3D::new(1.0, 1.0, 0.0));
    /// ```
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3D {
        self.point + self.direction * t
    }

    /// Orthogonal projection of `point` onto the infinite line
    ///
    /// A line with a zero-length direction returns `point` unchanged.
    pub fn project(&self, point: &Point3D) -> Point3D {
        let length_squared = self.direction.norm_squared();
        if length_squared < EPS * EPS {
            return *point;
        }
        let t = (point - self.point).dot(&self.direction) / length_squared;
        self.point_at(t)
    }

    /// Euclidean distance from `point` to the infinite line
    pub fn distance(&self, point: &Point3D) -> f64 {
        (point - self.project(point)).norm()
    }

    /// Whether both lines run in the same (or opposite) direction
    pub fn is_parallel(&self, other: &Line3D) -> bool {
        let (Some(a), Some(b)) = (
            self.direction.try_normalize(EPS),
            other.direction.try_normalize(EPS),
        ) else {
            return false;
        };
        (1.0 - a.dot(&b).abs()).abs() < EPS
    }

    /// Whether `point` lies on the infinite line
    pub fn is_part_of_line(&self, point: &Point3D) -> bool {
        self.distance(point) < EPS
    }

    /// Whether `point` lies on the segment from [`point1`](Self::point1) to [`point2`](Self::point2)
    pub fn is_part_of_straight_line(&self, point: &Point3D) -> bool {
        let length_squared = self.direction.norm_squared();
        if length_squared < EPS * EPS {
            return (point - self.point).norm() < EPS;
        }
        if !self.is_part_of_line(point) {
            return false;
        }
        let t = (point - self.point).dot(&self.direction) / length_squared;
        (-EPS..=1.0 + EPS).contains(&t)
    }

    /// Intersect an infinite line with an axis-aligned box
    ///
    /// Each of the six faces is tested in turn (x-min, x-max, y-min, y-max,
    /// z-min, z-max). A face is skipped when the direction is parallel to it;
    /// otherwise the hit is kept when its other two coordinates lie inside the
    /// box, bounds inclusive. At most two accepted points are returned, in
    /// face order.
    ///
    /// A line through an edge or corner touches several faces at the same
    /// point. Unlike a plain per-face scan, such coincident hits (closer than
    /// [`SQRT_EPS`](crate::SQRT_EPS)) are collapsed into one, so the second slot
    /// holds the actual exit point.
    ///
    /// # Arguments
    /// * `box_min` - Lower corner of the box
    /// * `box_max` - Upper corner of the box
    /// * `point` - A point on the line
    /// * `direction` - Direction of the line
    ///
    /// # Example
    /// ```
    /// use slice_bounds::{Line3D, Point3D, Vector3D};
    ///
    /// let hits = Line3D::box_line_intersection(
    ///     &Point3D::new(0.0, 0.0, 0.0),
    ///     &Point3D::new(10.0, 10.0, 10.0),
    ///     &Point3D::new(5.0, 5.0, -3.0),
    ///     &Vector3D::new(0.0, 0.0, 1.0),
    /// );
    /// assert_eq!(hits.count(), 2);
    /// assert_eq!(hits.first(), Some(Point3D::new(5.0, 5.0, 0.0)));
    /// ```
    pub fn box_line_intersection(
        box_min: &Point3D,
        box_max: &Point3D,
        point: &Point3D,
        direction: &Vector3D,
    ) -> IntersectionPair<Point3D> {
        let mut hits = IntersectionPair::empty();

        for face in 0..6 {
            let axis = face / 2;
            if direction[axis].abs() <= BOX_EPS {
                continue;
            }

            let plane_value = if face % 2 == 0 {
                box_min[axis]
            } else {
                box_max[axis]
            };
            let t = (plane_value - point[axis]) / direction[axis];
            let hit = point + direction * t;

            let j = (axis + 1) % 3;
            let k = (axis + 2) % 3;
            let inside = hit[j] >= box_min[j]
                && hit[j] <= box_max[j]
                && hit[k] >= box_min[k]
                && hit[k] <= box_max[k];

            if inside {
                hits.push_distinct(hit, |a, b| (a - b).norm());
            }
        }

        hits
    }

    /// Intersect an infinite 2D line with the rectangle spanned by `(x1, y1)` and `(x2, y2)`
    ///
    /// Returns the points where the line crosses the rectangle border. A line
    /// that only touches a corner yields one point.
    pub fn rectangle_line_intersection(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        point: &Point2D,
        direction: &Vector2D,
    ) -> IntersectionPair<Point2D> {
        let min = [x1.min(x2), y1.min(y2)];
        let max = [x1.max(x2), y1.max(y2)];
        let mut hits = IntersectionPair::empty();

        for side in 0..4 {
            let axis = side / 2;
            if direction[axis].abs() <= BOX_EPS {
                continue;
            }

            let border = if side % 2 == 0 { min[axis] } else { max[axis] };
            let t = (border - point[axis]) / direction[axis];
            let hit = point + direction * t;

            let other = 1 - axis;
            if hit[other] >= min[other] && hit[other] <= max[other] {
                hits.push_distinct(hit, |a, b| (a - b).norm());
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_at_and_segment_ends() {
        let line = Line3D::from_points(Point3D::new(1.0, 1.0, 1.0), Point3D::new(3.0, 1.0, 1.0));
        assert_eq!(line.point1(), Point3D::new(1.0, 1.0, 1.0));
        assert_eq!(line.point2(), Point3D::new(3.0, 1.0, 1.0));
        assert_eq!(line.point_at(0.5), Point3D::new(2.0, 1.0, 1.0));
        assert_eq!(line.point_at(-1.0), Point3D::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn test_distance_and_project() {
        let line = Line3D::new(Point3D::origin(), Vector3D::new(2.0, 0.0, 0.0));
        let point = Point3D::new(7.0, 3.0, 4.0);
        assert_eq!(line.project(&point), Point3D::new(7.0, 0.0, 0.0));
        assert_relative_eq!(line.distance(&point), 5.0);
    }

    #[test]
    fn test_project_on_degenerate_line_returns_point() {
        let line = Line3D::new(Point3D::new(1.0, 2.0, 3.0), Vector3D::zeros());
        let point = Point3D::new(4.0, 5.0, 6.0);
        assert_eq!(line.project(&point), point);
        assert_eq!(line.distance(&point), 0.0);
    }

    #[test]
    fn test_is_parallel() {
        let a = Line3D::new(Point3D::origin(), Vector3D::new(1.0, 1.0, 0.0));
        let b = Line3D::new(Point3D::new(0.0, 0.0, 5.0), Vector3D::new(-3.0, -3.0, 0.0));
        let c = Line3D::new(Point3D::origin(), Vector3D::new(1.0, 0.0, 0.0));
        assert!(a.is_parallel(&b));
        assert!(!a.is_parallel(&c));
        assert!(!a.is_parallel(&Line3D::default()));
    }

    #[test]
    fn test_part_of_line_versus_segment() {
        let line = Line3D::from_points(Point3D::origin(), Point3D::new(0.0, 0.0, 4.0));
        let inside = Point3D::new(0.0, 0.0, 2.0);
        let beyond = Point3D::new(0.0, 0.0, 6.0);
        let off = Point3D::new(0.0, 1.0, 2.0);

        assert!(line.is_part_of_line(&inside));
        assert!(line.is_part_of_line(&beyond));
        assert!(!line.is_part_of_line(&off));

        assert!(line.is_part_of_straight_line(&inside));
        assert!(line.is_part_of_straight_line(&line.point2()));
        assert!(!line.is_part_of_straight_line(&beyond));
        assert!(!line.is_part_of_straight_line(&off));
    }

    #[test]
    fn test_box_line_through_faces() {
        let hits = Line3D::box_line_intersection(
            &Point3D::new(0.0, 0.0, 0.0),
            &Point3D::new(10.0, 20.0, 30.0),
            &Point3D::new(-5.0, 10.0, 15.0),
            &Vector3D::new(1.0, 0.0, 0.0),
        );
        assert_eq!(hits.count(), 2);
        assert_eq!(hits.first(), Some(Point3D::new(0.0, 10.0, 15.0)));
        assert_eq!(hits.second(), Some(Point3D::new(10.0, 10.0, 15.0)));
    }

    #[test]
    fn test_box_line_miss() {
        let hits = Line3D::box_line_intersection(
            &Point3D::new(0.0, 0.0, 0.0),
            &Point3D::new(1.0, 1.0, 1.0),
            &Point3D::new(5.0, 5.0, 5.0),
            &Vector3D::new(0.0, 0.0, 1.0),
        );
        assert_eq!(hits.count(), 0);
        assert_eq!(hits.iter().count(), 0);
    }

    #[test]
    fn test_box_line_diagonal_through_corners() {
        let hits = Line3D::box_line_intersection(
            &Point3D::new(0.0, 0.0, 0.0),
            &Point3D::new(1.0, 1.0, 1.0),
            &Point3D::new(-1.0, -1.0, -1.0),
            &Vector3D::new(1.0, 1.0, 1.0),
        );
        // Each corner touches three faces but is reported once
        assert_eq!(hits.count(), 2);
        assert_eq!(hits.first(), Some(Point3D::new(0.0, 0.0, 0.0)));
        assert_eq!(hits.second(), Some(Point3D::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_box_line_entering_through_edge_reports_exit_face() {
        // enters on the x-min/y-min edge, leaves through z-max
        let hits = Line3D::box_line_intersection(
            &Point3D::new(0.0, 0.0, 0.0),
            &Point3D::new(1.0, 1.0, 1.0),
            &Point3D::new(0.0, 0.0, 0.2),
            &Vector3D::new(1.0, 1.0, 1.0),
        );
        assert_eq!(hits.count(), 2);
        assert_eq!(hits.first(), Some(Point3D::new(0.0, 0.0, 0.2)));
        let exit = hits.second().unwrap();
        assert!((exit - Point3D::new(0.8, 0.8, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_box_line_zero_direction() {
        let hits = Line3D::box_line_intersection(
            &Point3D::new(0.0, 0.0, 0.0),
            &Point3D::new(1.0, 1.0, 1.0),
            &Point3D::new(0.5, 0.5, 0.5),
            &Vector3D::zeros(),
        );
        assert_eq!(hits.count(), 0);
    }

    #[test]
    fn test_rectangle_line_intersection() {
        let hits = Line3D::rectangle_line_intersection(
            0.0,
            0.0,
            10.0,
            5.0,
            &Point2D::new(2.0, 1.0),
            &Vector2D::new(0.0, 1.0),
        );
        assert_eq!(hits.count(), 2);
        assert_eq!(hits.first(), Some(Point2D::new(2.0, 0.0)));
        assert_eq!(hits.second(), Some(Point2D::new(2.0, 5.0)));

        let corner = Line3D::rectangle_line_intersection(
            0.0,
            0.0,
            10.0,
            10.0,
            &Point2D::new(-1.0, 9.0),
            &Vector2D::new(1.0, 1.0),
        );
        assert_eq!(corner.count(), 1);
        assert_eq!(corner.first(), Some(Point2D::new(0.0, 10.0)));
    }
}
