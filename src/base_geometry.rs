//! Shared index/world bookkeeping for planes and voxel grids
//!
//! A [`BaseGeometry`] couples an index-to-world transform with an
//! index-space bounding box `[xmin, xmax, ymin, ymax, zmin, zmax]`. The inverse
//! transform is computed whenever the transform changes, so every setter that
//! touches the linear part can fail with [`Error::SingularTransform`].
//!
//! With `image_geometry` set, the origin denotes the *centre* of the first
//! voxel; the bounding box itself stays corner based, so corner points and the
//! centre are shifted by half a voxel in index space.

use crate::error::{Error, Result};
use crate::numeric::{Point3D, Vector3D};
use crate::transform::AffineTransform3D;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index-space bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`
pub type BoundsArray = [f64; 6];

/// Transform, inverse, bounds and the corner/centre origin convention
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BaseGeometryFields"))]
pub struct BaseGeometry {
    index_to_world: AffineTransform3D,
    #[cfg_attr(feature = "serde", serde(skip))]
    world_to_index: AffineTransform3D,
    bounds: BoundsArray,
    image_geometry: bool,
}

/// Serialized form; the inverse is rebuilt and the bounds rechecked on load
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BaseGeometryFields {
    index_to_world: AffineTransform3D,
    bounds: BoundsArray,
    image_geometry: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<BaseGeometryFields> for BaseGeometry {
    type Error = Error;

    fn try_from(fields: BaseGeometryFields) -> Result<Self> {
        let mut geometry = BaseGeometry::new(fields.index_to_world, fields.bounds)?;
        geometry.set_image_geometry(fields.image_geometry);
        Ok(geometry)
    }
}

fn check_bounds(bounds: &BoundsArray) -> Result<()> {
    for axis in 0..3 {
        let extent = bounds[2 * axis + 1] - bounds[2 * axis];
        if !(extent >= 0.0) {
            return Err(Error::invalid_extent(axis, extent));
        }
    }
    Ok(())
}

fn invert(transform: &AffineTransform3D) -> Result<AffineTransform3D> {
    transform.inverse().ok_or_else(|| {
        Error::SingularTransform(format!(
            "matrix {:?} has no inverse",
            transform.matrix.as_slice()
        ))
    })
}

impl BaseGeometry {
    /// Create a geometry from its index-to-world transform and index bounds
    ///
    /// # Errors
    /// [`Error::SingularTransform`] if the linear part cannot be inverted,
    /// [`Error::InvalidBounds`] if any `max < min`.
    pub fn new(index_to_world: AffineTransform3D, bounds: BoundsArray) -> Result<Self> {
        check_bounds(&bounds)?;
        let world_to_index = invert(&index_to_world)?;
        Ok(Self {
            index_to_world,
            world_to_index,
            bounds,
            image_geometry: false,
        })
    }

    /// The index-to-world transform
    pub fn index_to_world_transform(&self) -> &AffineTransform3D {
        &self.index_to_world
    }

    /// Replace the index-to-world transform
    ///
    /// On error the geometry is left unchanged.
    pub fn set_index_to_world_transform(&mut self, transform: AffineTransform3D) -> Result<()> {
        self.world_to_index = invert(&transform)?;
        self.index_to_world = transform;
        Ok(())
    }

    /// Index-space bounds
    pub fn bounds(&self) -> BoundsArray {
        self.bounds
    }

    /// Replace the index-space bounds
    pub fn set_bounds(&mut self, bounds: BoundsArray) -> Result<()> {
        check_bounds(&bounds)?;
        self.bounds = bounds;
        Ok(())
    }

    /// Whether the origin is the centre (true) or the corner (false) of the first voxel
    pub fn image_geometry(&self) -> bool {
        self.image_geometry
    }

    /// Switch between centre-based and corner-based origin
    pub fn set_image_geometry(&mut self, image_geometry: bool) {
        self.image_geometry = image_geometry;
    }

    /// World position of index `(0, 0, 0)`
    pub fn origin(&self) -> Point3D {
        Point3D::from(self.index_to_world.offset)
    }

    /// Move the geometry so that index `(0, 0, 0)` lands on `origin`
    pub fn set_origin(&mut self, origin: Point3D) {
        self.index_to_world.offset = origin.coords;
        self.world_to_index.offset = -(self.world_to_index.matrix * origin.coords);
    }

    /// Length of each matrix column, i.e. the voxel size along each index axis
    pub fn spacing(&self) -> Vector3D {
        Vector3D::new(
            self.index_to_world.column(0).norm(),
            self.index_to_world.column(1).norm(),
            self.index_to_world.column(2).norm(),
        )
    }

    /// Rescale the matrix columns to the given spacing, keeping their directions
    pub fn set_spacing(&mut self, spacing: Vector3D) -> Result<()> {
        let mut transform = self.index_to_world;
        for axis in 0..3 {
            let column = transform.column(axis);
            let norm = column.norm();
            if norm <= 0.0 {
                return Err(Error::degenerate_vector("index axis", norm));
            }
            transform.set_column(axis, column / norm * spacing[axis]);
        }
        self.set_index_to_world_transform(transform)
    }

    /// Extent of the bounding box along `axis`, in index units
    ///
    /// # Panics
    /// Panics if `axis >= 3`.
    pub fn extent(&self, axis: usize) -> f64 {
        self.bounds[2 * axis + 1] - self.bounds[2 * axis]
    }

    /// Extent of the bounding box along `axis`, in world units
    pub fn extent_in_mm(&self, axis: usize) -> f64 {
        self.index_to_world.column(axis).norm() * self.extent(axis)
    }

    /// World vector spanning the full extent along index `axis`
    pub fn axis_vector(&self, axis: usize) -> Vector3D {
        self.index_to_world.column(axis) * self.extent(axis)
    }

    /// Corner point `id` (0..8) in world coordinates
    ///
    /// Bit 2 of `id` selects the x bound, bit 1 the y bound and bit 0 the z bound,
    /// so corner 0 is `(xmin, ymin, zmin)` and corner 7 is `(xmax, ymax, zmax)`.
    /// Returns `None` for `id >= 8`.
    pub fn corner_point(&self, id: usize) -> Option<Point3D> {
        if id >= 8 {
            return None;
        }
        Some(self.corner_point_at(id & 4 == 0, id & 2 == 0, id & 1 == 0))
    }

    /// Corner point selected per axis: `true` picks the lower bound
    pub fn corner_point_at(&self, x_front: bool, y_front: bool, z_front: bool) -> Point3D {
        let b = &self.bounds;
        let mut corner = Point3D::new(
            if x_front { b[0] } else { b[1] },
            if y_front { b[2] } else { b[3] },
            if z_front { b[4] } else { b[5] },
        );
        if self.image_geometry {
            // the bounding box is corner based even for images
            corner -= Vector3D::repeat(0.5);
        }
        self.index_to_world.transform_point(&corner)
    }

    /// All eight corners, ordered by [`corner_point`](Self::corner_point) id
    pub fn corner_points(&self) -> [Point3D; 8] {
        std::array::from_fn(|id| self.corner_point_at(id & 4 == 0, id & 2 == 0, id & 1 == 0))
    }

    /// World position of the bounding box centre
    pub fn center(&self) -> Point3D {
        let b = &self.bounds;
        let mut center = Point3D::new(
            (b[0] + b[1]) * 0.5,
            (b[2] + b[3]) * 0.5,
            (b[4] + b[5]) * 0.5,
        );
        if self.image_geometry {
            center -= Vector3D::repeat(0.5);
        }
        self.index_to_world.transform_point(&center)
    }

    /// Squared length of the world-space diagonal
    pub fn diagonal_length2(&self) -> f64 {
        (self.corner_point_at(false, false, false) - self.corner_point_at(true, true, true))
            .norm_squared()
    }

    /// Length of the world-space diagonal
    pub fn diagonal_length(&self) -> f64 {
        self.diagonal_length2().sqrt()
    }

    /// Convert a world point to continuous index coordinates
    #[inline]
    pub fn world_to_index(&self, point: &Point3D) -> Point3D {
        self.world_to_index.transform_point(point)
    }

    /// Convert a world vector to index units (linear part only)
    #[inline]
    pub fn world_to_index_vector(&self, vector: &Vector3D) -> Vector3D {
        self.world_to_index.transform_vector(vector)
    }

    /// Convert continuous index coordinates to a world point
    #[inline]
    pub fn index_to_world(&self, index: &Point3D) -> Point3D {
        self.index_to_world.transform_point(index)
    }

    /// Convert an index-space vector to world units (linear part only)
    #[inline]
    pub fn index_to_world_vector(&self, vector: &Vector3D) -> Vector3D {
        self.index_to_world.transform_vector(vector)
    }

    /// Whether a world point falls inside the geometry
    pub fn is_inside(&self, point: &Point3D) -> bool {
        self.is_index_inside(&self.world_to_index(point))
    }

    /// Whether continuous index coordinates fall inside the geometry
    ///
    /// For image geometries the index is first rounded to its voxel (halves
    /// round up) and the upper border of each axis is excluded.
    pub fn is_index_inside(&self, index: &Point3D) -> bool {
        let b = &self.bounds;
        if self.image_geometry {
            let discrete = index.map(|v| (v + 0.5).floor());
            (0..3).all(|axis| {
                discrete[axis] >= b[2 * axis] && discrete[axis] < b[2 * axis + 1]
            })
        } else {
            (0..3).all(|axis| index[axis] >= b[2 * axis] && index[axis] <= b[2 * axis + 1])
        }
    }

    /// The same geometry moved by a world-space transform applied after index-to-world
    pub fn transformed(&self, world: &AffineTransform3D) -> Result<Self> {
        let mut moved = self.clone();
        moved.set_index_to_world_transform(self.index_to_world.compose(world))?;
        Ok(moved)
    }
}
