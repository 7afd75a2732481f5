//! # slice_bounds
//!
//! Plane geometry and slice-bounds computation for 3D voxel grids.
//!
//! Given a voxel grid and a cutting plane (or the two bounding planes of a
//! plane stack, or a set of world-space points), this crate computes which
//! index range along each grid axis is touched. The typical consumer is a
//! viewer that wants to know which slices a reslice plane passes through, or
//! a statistics tool restricting work to the slices a region touches.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Arbitrary (rotated, sheared, anisotropic) grids via full affine transforms
//! - Corner-based and centre-based ("image") voxel origin conventions
//! - Planes with 2D parametrization, plane/line and plane/plane intersection
//! - Optional `serde` support for all value types
//!
//! ## Example
//!
//! ```
//! use slice_bounds::{ClippedSurfaceBoundsCalculator, GridGeometry, PlaneGeometry, Point3D, Vector3D};
//!
//! # fn main() -> slice_bounds::Result<()> {
//! let grid = GridGeometry::new(Point3D::origin(), Vector3D::repeat(1.0), [512, 512, 20])?;
//! let sagittal = PlaneGeometry::from_origin_normal(Point3D::new(256.0, 0.0, 0.0), Vector3D::x())?;
//!
//! let mut calculator = ClippedSurfaceBoundsCalculator::new();
//! calculator.set_plane(&sagittal, &grid);
//! calculator.update();
//!
//! assert_eq!(calculator.min_max_spatial_direction_x(), (256, 256));
//! assert_eq!(calculator.min_max_spatial_direction_z(), (0, 19));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod base_geometry;
pub mod clipped_bounds;
pub mod config;
pub mod error;
pub mod grid_geometry;
pub mod line;
pub mod numeric;
pub mod plane_geometry;
pub mod sliced_geometry;
pub mod transform;

pub use base_geometry::{BaseGeometry, BoundsArray};
pub use clipped_bounds::{
    BoundsInput, ClippedSurfaceBoundsCalculator, OutputType, SENTINEL, is_empty_range,
};
pub use config::{CalculatorConfig, ClampPolicy, Tolerances};
pub use error::{Error, Result};
pub use grid_geometry::GridGeometry;
pub use line::{IntersectionPair, Line3D};
pub use numeric::{
    BOX_EPS, EPS, Matrix3D, Point2D, Point3D, SQRT_EPS, Vector2D, Vector3D,
    round_half_away_from_zero,
};
pub use plane_geometry::{PlaneGeometry, PlaneOrientation, StandardPlaneOptions};
pub use sliced_geometry::SlicedGeometry;
pub use transform::AffineTransform3D;
