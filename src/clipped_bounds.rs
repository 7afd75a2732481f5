//! Index ranges of a grid touched by a cutting plane or a point set
//!
//! [`ClippedSurfaceBoundsCalculator`] answers "which slices of this grid does
//! this plane (or this plane pair, or these points) touch?" with one inclusive
//! `(min, max)` index range per grid axis, clamped to `[0, dimension - 1]`.
//!
//! For a plane, the twelve edges of the grid's bounding box are intersected
//! with it; every hit is converted to continuous index coordinates and rounded
//! half away from zero. An axis the plane never reaches keeps [`SENTINEL`],
//! which is an empty range rather than an error.
//!
//! # Example
//! ```
//! use slice_bounds::{ClippedSurfaceBoundsCalculator, GridGeometry, PlaneGeometry, Point3D, Vector3D};
//!
//! let grid = GridGeometry::new(Point3D::origin(), Vector3D::repeat(1.0), [512, 512, 20]).unwrap();
//! let plane = PlaneGeometry::from_origin_normal(Point3D::new(0.0, 0.0, 3.0), Vector3D::z()).unwrap();
//!
//! let mut calculator = ClippedSurfaceBoundsCalculator::new();
//! calculator.set_plane(&plane, &grid);
//! calculator.update();
//! assert_eq!(calculator.min_max_spatial_direction_z(), (3, 3));
//! ```

use tracing::{debug, trace, warn};

use crate::config::{CalculatorConfig, ClampPolicy};
use crate::error::{Error, Result};
use crate::grid_geometry::GridGeometry;
use crate::line::Line3D;
use crate::numeric::{Point3D, round_half_away_from_zero};
use crate::plane_geometry::PlaneGeometry;
use crate::sliced_geometry::SlicedGeometry;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive `(min, max)` index range along one grid axis
pub type OutputType = (i32, i32);

/// Range reported for an axis nothing was found on
pub const SENTINEL: OutputType = (i32::MAX, i32::MIN);

/// Whether `range` contains no index, which is the case for [`SENTINEL`]
pub fn is_empty_range(range: OutputType) -> bool {
    range.0 > range.1
}

/// Corner pairs of the twelve bounding-box edges
///
/// Corners are numbered `origin`, `+x`, `+y`, `+z`, `+x+y`, `+x+z`, `+y+z`, `+x+y+z`.
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 4),
    (1, 5),
    (2, 4),
    (2, 6),
    (3, 5),
    (3, 6),
    (4, 7),
    (5, 7),
    (6, 7),
];

/// What the calculator measures against the grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundsInput {
    /// A single cutting plane
    Plane(PlaneGeometry),
    /// The two bounding planes of a plane stack; results of both are merged
    PlanePair {
        /// First slice of the stack
        first: PlaneGeometry,
        /// Last slice of the stack
        last: PlaneGeometry,
    },
    /// World-space points
    Points(Vec<Point3D>),
}

impl BoundsInput {
    /// The first and last slice of `sliced` as a plane pair
    pub fn from_sliced(sliced: &SlicedGeometry) -> Self {
        BoundsInput::PlanePair {
            first: sliced.first_plane(),
            last: sliced.last_plane(),
        }
    }
}

/// Computes per-axis index ranges of a grid touched by a plane, plane pair or point list
#[derive(Debug, Clone)]
pub struct ClippedSurfaceBoundsCalculator {
    config: CalculatorConfig,
    input: Option<BoundsInput>,
    grid: Option<GridGeometry>,
    output: [OutputType; 3],
}

impl Default for ClippedSurfaceBoundsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn fold_index(output: &mut [OutputType; 3], index: &Point3D) {
    for (axis, range) in output.iter_mut().enumerate() {
        let value = round_half_away_from_zero(index[axis]);
        range.0 = range.0.min(value);
        range.1 = range.1.max(value);
    }
}

/// Clamp every non-sentinel axis into `[0, dimension - 1]`
fn enforce_image_bounds(output: &mut [OutputType; 3], dimensions: [u32; 3]) {
    for (range, &dimension) in output.iter_mut().zip(dimensions.iter()) {
        if *range == SENTINEL {
            continue;
        }
        let last = i32::try_from(dimension).map_or(i32::MAX, |d| d - 1).max(0);
        range.0 = range.0.min(last).max(0);
        range.1 = range.1.min(last).max(0);
    }
}

impl ClippedSurfaceBoundsCalculator {
    /// A calculator with the default configuration and no input
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// A calculator with the given configuration and no input
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            config,
            input: None,
            grid: None,
            output: [SENTINEL; 3],
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// The current input, if any
    pub fn input(&self) -> Option<&BoundsInput> {
        self.input.as_ref()
    }

    /// The grid snapshot taken by the last successful `set_*` call
    pub fn grid(&self) -> Option<&GridGeometry> {
        self.grid.as_ref()
    }

    /// Replace the input and take a snapshot of `grid`
    ///
    /// An empty point list is ignored and leaves the previous state in place;
    /// use [`try_set_input`](Self::try_set_input) to observe that case.
    pub fn set_input(&mut self, input: BoundsInput, grid: &GridGeometry) {
        if let Err(error) = self.try_set_input(Some(input), Some(grid)) {
            debug!(%error, "calculator input ignored");
        }
    }

    /// Measure a single plane against `grid`
    pub fn set_plane(&mut self, plane: &PlaneGeometry, grid: &GridGeometry) {
        self.set_input(BoundsInput::Plane(plane.clone()), grid);
    }

    /// Measure two bounding planes against `grid`
    pub fn set_plane_pair(&mut self, first: &PlaneGeometry, last: &PlaneGeometry, grid: &GridGeometry) {
        self.set_input(
            BoundsInput::PlanePair {
                first: first.clone(),
                last: last.clone(),
            },
            grid,
        );
    }

    /// Measure the first and last slice of `sliced` against `grid`
    pub fn set_sliced_geometry(&mut self, sliced: &SlicedGeometry, grid: &GridGeometry) {
        self.set_input(BoundsInput::from_sliced(sliced), grid);
    }

    /// Measure the index bounding box of world-space `points` in `grid`
    pub fn set_points(&mut self, points: &[Point3D], grid: &GridGeometry) {
        self.set_input(BoundsInput::Points(points.to_vec()), grid);
    }

    /// Replace the input, or report why it cannot be used
    ///
    /// # Errors
    /// [`Error::MissingInput`] if `input` or `grid` is `None`, and
    /// [`Error::EmptyPointList`] for a point list without points. The
    /// calculator keeps its previous input, grid and output in both cases.
    pub fn try_set_input(&mut self, input: Option<BoundsInput>, grid: Option<&GridGeometry>) -> Result<()> {
        let input = input.ok_or_else(|| Error::MissingInput("bounds input".to_string()))?;
        let grid = grid.ok_or_else(|| Error::MissingInput("grid geometry".to_string()))?;
        if matches!(&input, BoundsInput::Points(points) if points.is_empty()) {
            return Err(Error::EmptyPointList);
        }
        self.input = Some(input);
        self.grid = Some(grid.clone());
        Ok(())
    }

    /// Recompute the output from the current input
    ///
    /// Without an input every axis reports [`SENTINEL`].
    pub fn update(&mut self) {
        let mut output = [SENTINEL; 3];

        match (&self.input, &self.grid) {
            (Some(BoundsInput::Plane(plane)), Some(grid)) => {
                self.calculate_intersection_points(plane, grid, &mut output);
                self.finish_plane_path(&mut output, grid);
            }
            (Some(BoundsInput::PlanePair { first, last }), Some(grid)) => {
                self.calculate_intersection_points(first, grid, &mut output);
                self.calculate_intersection_points(last, grid, &mut output);
                self.finish_plane_path(&mut output, grid);
            }
            (Some(BoundsInput::Points(points)), Some(grid)) => {
                for point in points {
                    fold_index(&mut output, &grid.world_to_index(point));
                }
                enforce_image_bounds(&mut output, grid.dimensions());
            }
            _ => debug!("no input set, reporting empty ranges"),
        }

        debug!(
            x = ?output[0],
            y = ?output[1],
            z = ?output[2],
            "clipped surface bounds updated"
        );
        self.output = output;
    }

    fn finish_plane_path(&self, output: &mut [OutputType; 3], grid: &GridGeometry) {
        if self.config.clamp_policy() == ClampPolicy::Once {
            enforce_image_bounds(output, grid.dimensions());
        }
    }

    /// Fold the index positions where `plane` crosses the grid's box edges into `output`
    fn calculate_intersection_points(
        &self,
        plane: &PlaneGeometry,
        grid: &GridGeometry,
        output: &mut [OutputType; 3],
    ) {
        let tolerances = self.config.tolerances();
        let clamp_each = self.config.clamp_policy() == ClampPolicy::PerIntersection;

        let origin = grid.base().corner_point_at(true, true, true);
        let x = grid.x_direction();
        let y = grid.y_direction();
        let z = grid.z_direction();
        let corners = [
            origin,
            origin + x,
            origin + y,
            origin + z,
            origin + x + y,
            origin + x + z,
            origin + y + z,
            origin + x + y + z,
        ];

        for (edge, &(start, end)) in BOX_EDGES.iter().enumerate() {
            let line = Line3D::from_points(corners[start], corners[end]);

            let hit = if line.direction().norm() < tolerances.eps
                && plane.distance(&line.point()) < tolerances.sqrt_eps
            {
                warn!(edge, "degenerate grid edge lies on the plane");
                Some(line.point())
            } else {
                match (plane.intersection_point(&line), plane.intersection_point_param(&line)) {
                    (Some(point), Some(t))
                        if t >= -tolerances.sqrt_eps && t <= 1.0 + tolerances.sqrt_eps =>
                    {
                        Some(point)
                    }
                    _ => None,
                }
            };

            if let Some(point) = hit {
                let index = grid.world_to_index(&point);
                trace!(edge, ?index, "plane crosses grid edge");
                fold_index(output, &index);
                if clamp_each {
                    enforce_image_bounds(output, grid.dimensions());
                }
            }
        }
    }

    /// Index range along grid x
    pub fn min_max_spatial_direction_x(&self) -> OutputType {
        self.output[0]
    }

    /// Index range along grid y
    pub fn min_max_spatial_direction_y(&self) -> OutputType {
        self.output[1]
    }

    /// Index range along grid z
    pub fn min_max_spatial_direction_z(&self) -> OutputType {
        self.output[2]
    }

    /// Index range along grid axis `axis`
    pub fn min_max(&self, axis: usize) -> Result<OutputType> {
        self.output.get(axis).copied().ok_or(Error::AxisOutOfRange(axis))
    }

    /// Ranges along x, y and z
    pub fn output(&self) -> [OutputType; 3] {
        self.output
    }
}
