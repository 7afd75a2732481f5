//! Evenly spaced stacks of parallel planes
//!
//! A [`SlicedGeometry`] is the plane-stack view of a volume: slice `i` is the
//! first plane moved `i` times along the stacking direction. Its first and
//! last slices are what the bounds calculator uses as a plane pair.

use crate::error::{Error, Result};
use crate::grid_geometry::GridGeometry;
use crate::numeric::Vector3D;
use crate::plane_geometry::PlaneGeometry;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stack of `slices` parallel planes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlicedGeometry {
    first: PlaneGeometry,
    direction: Vector3D,
    slices: u32,
}

impl SlicedGeometry {
    /// Stack `slices` planes, one normal-column length apart
    pub fn evenly_spaced(plane: &PlaneGeometry, slices: u32) -> Result<Self> {
        let z_spacing = plane.base().extent_in_mm(2) / plane.base().extent(2);
        Self::evenly_spaced_with_spacing(plane, z_spacing, slices)
    }

    /// Stack `slices` planes, `z_spacing` apart along the plane normal
    ///
    /// # Errors
    /// [`Error::InvalidBounds`] when `slices` is zero or `z_spacing` is not positive.
    pub fn evenly_spaced_with_spacing(
        plane: &PlaneGeometry,
        z_spacing: f64,
        slices: u32,
    ) -> Result<Self> {
        if slices == 0 {
            return Err(Error::invalid_extent(2, 0.0));
        }
        if !(z_spacing > 0.0) {
            return Err(Error::InvalidBounds(format!(
                "slice spacing must be positive, got {}",
                z_spacing
            )));
        }
        Ok(Self {
            first: plane.clone(),
            direction: plane.normal_unit() * z_spacing,
            slices,
        })
    }

    /// Number of slices
    pub fn slices(&self) -> u32 {
        self.slices
    }

    /// Distance between consecutive slices
    pub fn z_spacing(&self) -> f64 {
        self.direction.norm()
    }

    /// Offset from one slice origin to the next
    pub fn direction(&self) -> Vector3D {
        self.direction
    }

    /// Slice `index`, or `None` past the last slice
    pub fn plane(&self, index: u32) -> Option<PlaneGeometry> {
        if index >= self.slices {
            return None;
        }
        let mut plane = self.first.clone();
        plane.set_origin(self.first.origin() + self.direction * f64::from(index));
        Some(plane)
    }

    /// The first slice
    pub fn first_plane(&self) -> PlaneGeometry {
        self.first.clone()
    }

    /// The last slice
    pub fn last_plane(&self) -> PlaneGeometry {
        let mut plane = self.first.clone();
        plane.set_origin(self.first.origin() + self.direction * f64::from(self.slices - 1));
        plane
    }

    /// The voxel grid covered by the stack
    ///
    /// In-plane dimensions are the plane's width and height rounded to whole
    /// voxels; the third index axis runs along [`direction`](Self::direction).
    pub fn to_grid(&self, image_geometry: bool) -> Result<GridGeometry> {
        let width = self.first.width().round();
        let height = self.first.height().round();
        if !(width >= 1.0) {
            return Err(Error::invalid_extent(0, self.first.width()));
        }
        if !(height >= 1.0) {
            return Err(Error::invalid_extent(1, self.first.height()));
        }

        let mut transform = *self.first.index_to_world_transform();
        transform.set_column(2, self.direction);
        let mut grid = GridGeometry::from_transform(transform, [width as u32, height as u32, self.slices])?;
        grid.set_image_geometry(image_geometry);
        Ok(grid)
    }
}
