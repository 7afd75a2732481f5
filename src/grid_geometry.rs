//! Voxel grids: a [`BaseGeometry`] with integer dimensions
//!
//! A grid's bounds are always `(0, dx, 0, dy, 0, dz)`. Grids built by the
//! constructors here use the image convention (origin at the centre of the
//! first voxel) unless stated otherwise.

use crate::base_geometry::BaseGeometry;
use crate::error::{Error, Result};
use crate::numeric::{EPS, Point3D, Vector3D};
use crate::plane_geometry::PlaneGeometry;
use crate::sliced_geometry::SlicedGeometry;
use crate::transform::AffineTransform3D;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry of a 3D voxel grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridGeometryFields"))]
pub struct GridGeometry {
    base: BaseGeometry,
    dimensions: [u32; 3],
}

fn grid_bounds(dimensions: [u32; 3]) -> Result<[f64; 6]> {
    if let Some(axis) = dimensions.iter().position(|&d| d == 0) {
        return Err(Error::invalid_extent(axis, 0.0));
    }
    Ok([
        0.0,
        f64::from(dimensions[0]),
        0.0,
        f64::from(dimensions[1]),
        0.0,
        f64::from(dimensions[2]),
    ])
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GridGeometryFields {
    base: BaseGeometry,
    dimensions: [u32; 3],
}

#[cfg(feature = "serde")]
impl TryFrom<GridGeometryFields> for GridGeometry {
    type Error = Error;

    fn try_from(fields: GridGeometryFields) -> Result<Self> {
        let bounds = grid_bounds(fields.dimensions)?;
        if fields.base.bounds() != bounds {
            return Err(Error::InvalidBounds(format!(
                "bounds {:?} do not match dimensions {:?}",
                fields.base.bounds(),
                fields.dimensions
            )));
        }
        Ok(Self {
            base: fields.base,
            dimensions: fields.dimensions,
        })
    }
}

impl GridGeometry {
    /// Create an axis-aligned grid with the image convention
    ///
    /// # Arguments
    /// * `origin` - World position of the centre of voxel `(0, 0, 0)`
    /// * `spacing` - Voxel size along x, y and z
    /// * `dimensions` - Number of voxels along x, y and z
    ///
    /// # Example
    /// ```
    /// use slice_bounds::{GridGeometry, Point3D, Vector3D};
    ///
    /// let grid = GridGeometry::new(Point3D::origin(), Vector3D::new(1.0, 1.0, 2.0), [512, 512, 20]).unwrap();
    /// assert_eq!(grid.world_to_index(&Point3D::new(3.0, 4.0, 10.0)), Point3D::new(3.0, 4.0, 5.0));
    /// ```
    pub fn new(origin: Point3D, spacing: Vector3D, dimensions: [u32; 3]) -> Result<Self> {
        let transform = AffineTransform3D::from_diagonal(spacing, origin.coords);
        Self::from_transform(transform, dimensions)
    }

    /// Create a grid whose index axes point along arbitrary (non-parallel) directions
    ///
    /// Directions are normalised and scaled by `spacing`.
    pub fn with_directions(
        origin: Point3D,
        directions: [Vector3D; 3],
        spacing: Vector3D,
        dimensions: [u32; 3],
    ) -> Result<Self> {
        let mut columns = [Vector3D::zeros(); 3];
        for (axis, direction) in directions.iter().enumerate() {
            let norm = direction.norm();
            if norm < EPS {
                return Err(Error::degenerate_vector("grid axis", norm));
            }
            columns[axis] = direction / norm * spacing[axis];
        }
        Self::from_transform(AffineTransform3D::from_columns(columns, origin.coords), dimensions)
    }

    /// Create a grid from an explicit index-to-world transform, with the image convention
    pub fn from_transform(transform: AffineTransform3D, dimensions: [u32; 3]) -> Result<Self> {
        let mut base = BaseGeometry::new(transform, grid_bounds(dimensions)?)?;
        base.set_image_geometry(true);
        Ok(Self { base, dimensions })
    }

    /// Stack `slices` copies of `plane` along its normal
    ///
    /// The slice distance is the length of the plane's normal column and the
    /// origin convention is taken from the plane. See [`SlicedGeometry::to_grid`].
    pub fn evenly_spaced(plane: &PlaneGeometry, slices: u32) -> Result<Self> {
        SlicedGeometry::evenly_spaced(plane, slices)?.to_grid(plane.base().image_geometry())
    }

    /// The shared index/world state
    pub fn base(&self) -> &BaseGeometry {
        &self.base
    }

    /// Number of voxels along each index axis
    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    /// World position of index `(0, 0, 0)`
    pub fn origin(&self) -> Point3D {
        self.base.origin()
    }

    /// Move the grid
    pub fn set_origin(&mut self, origin: Point3D) {
        self.base.set_origin(origin);
    }

    /// Voxel size along each index axis
    pub fn spacing(&self) -> Vector3D {
        self.base.spacing()
    }

    /// Whether the origin is the centre of the first voxel
    pub fn image_geometry(&self) -> bool {
        self.base.image_geometry()
    }

    /// Switch between centre-based and corner-based origin
    pub fn set_image_geometry(&mut self, image_geometry: bool) {
        self.base.set_image_geometry(image_geometry);
    }

    /// The index-to-world transform
    pub fn index_to_world_transform(&self) -> &AffineTransform3D {
        self.base.index_to_world_transform()
    }

    /// World vector spanning the grid along index x
    pub fn x_direction(&self) -> Vector3D {
        self.base.axis_vector(0)
    }

    /// World vector spanning the grid along index y
    pub fn y_direction(&self) -> Vector3D {
        self.base.axis_vector(1)
    }

    /// World vector spanning the grid along index z
    pub fn z_direction(&self) -> Vector3D {
        self.base.axis_vector(2)
    }

    /// Corner point `id` (0..8), see [`BaseGeometry::corner_point`]
    pub fn corner_point(&self, id: usize) -> Option<Point3D> {
        self.base.corner_point(id)
    }

    /// All eight corners of the grid's bounding box
    pub fn corner_points(&self) -> [Point3D; 8] {
        self.base.corner_points()
    }

    /// Convert a world point to continuous index coordinates
    pub fn world_to_index(&self, point: &Point3D) -> Point3D {
        self.base.world_to_index(point)
    }

    /// Convert continuous index coordinates to a world point
    pub fn index_to_world(&self, index: &Point3D) -> Point3D {
        self.base.index_to_world(index)
    }

    /// Whether a world point falls inside the grid
    pub fn is_inside(&self, point: &Point3D) -> bool {
        self.base.is_inside(point)
    }

    /// The same grid moved by a world-space transform
    pub fn transformed(&self, world: &AffineTransform3D) -> Result<Self> {
        Ok(Self {
            base: self.base.transformed(world)?,
            dimensions: self.dimensions,
        })
    }
}
