//! Affine index-to-world transforms
//!
//! An [`AffineTransform3D`] maps index (grid/local) coordinates to world
//! coordinates as `world = matrix * index + offset`. The columns of `matrix`
//! are the world-space images of the index axes, scaled by spacing.

use crate::numeric::{Matrix3D, Point3D, Vector3D};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3x3 linear part plus a translation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffineTransform3D {
    /// Linear part; column `i` is the world direction of index axis `i`
    pub matrix: Matrix3D,
    /// Translation, i.e. the world position of index `(0, 0, 0)`
    pub offset: Vector3D,
}

impl Default for AffineTransform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform3D {
    /// Create a transform from a matrix and offset
    pub fn new(matrix: Matrix3D, offset: Vector3D) -> Self {
        Self { matrix, offset }
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3D::identity(),
            offset: Vector3D::zeros(),
        }
    }

    /// Build a transform whose matrix columns are the three given axis vectors
    pub fn from_columns(columns: [Vector3D; 3], offset: Vector3D) -> Self {
        Self {
            matrix: Matrix3D::from_columns(&columns),
            offset,
        }
    }

    /// Build an axis-aligned scaling transform
    pub fn from_diagonal(diagonal: Vector3D, offset: Vector3D) -> Self {
        Self {
            matrix: Matrix3D::from_diagonal(&diagonal),
            offset,
        }
    }

    /// Apply the transform to a point (linear part and offset)
    ///
    /// # Example
    /// ```
    /// use slice_bounds::{AffineTransform3D, Point3D, Vector3D};
    ///
    /// let t = AffineTransform3D::from_diagonal(Vector3D::new(2.0, 2.0, 2.0), Vector3D::new(1.0, 0.0, 0.0));
    /// assert_eq!(t.transform_point(&Point3D::new(1.0, 1.0, 1.0)), Point3D::new(3.0, 2.0, 2.0));
    /// ```
    #[inline]
    pub fn transform_point(&self, point: &Point3D) -> Point3D {
        Point3D::from(self.matrix * point.coords + self.offset)
    }

    /// Apply only the linear part to a vector
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3D) -> Vector3D {
        self.matrix * vector
    }

    /// Column `axis` of the linear part
    ///
    /// # Panics
    /// Panics if `axis >= 3`.
    #[inline]
    pub fn column(&self, axis: usize) -> Vector3D {
        self.matrix.column(axis).into_owned()
    }

    /// Replace column `axis` of the linear part
    pub fn set_column(&mut self, axis: usize, column: Vector3D) {
        self.matrix.set_column(axis, &column);
    }

    /// The inverse transform, or `None` when the linear part is singular
    pub fn inverse(&self) -> Option<Self> {
        let inverse = self.matrix.try_inverse()?;
        if inverse.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Self {
            matrix: inverse,
            offset: -(inverse * self.offset),
        })
    }

    /// The transform that applies `self` first and then `outer`
    pub fn compose(&self, outer: &AffineTransform3D) -> Self {
        Self {
            matrix: outer.matrix * self.matrix,
            offset: outer.matrix * self.offset + outer.offset,
        }
    }

    /// Check whether the column-normalized linear part is a proper rotation
    ///
    /// The determinant must be 1 and `R * R^T` must equal the identity, both
    /// within `epsilon`. Scaling by spacing is ignored since columns are
    /// normalized first.
    pub fn is_rotation(&self, epsilon: f64) -> bool {
        let mut normalized = self.matrix;
        for mut column in normalized.column_iter_mut() {
            let norm = column.norm();
            if norm > 0.0 {
                column /= norm;
            }
        }

        let mut rotation = true;

        let det = normalized.determinant();
        if (det - 1.0).abs() > epsilon {
            tracing::warn!(det, "invalid rotation matrix: determinant != 1");
            rotation = false;
        }

        let deviation = (normalized * normalized.transpose() - Matrix3D::identity()).amax();
        if deviation > epsilon {
            tracing::warn!(deviation, "invalid rotation matrix: R*R^T != identity");
            rotation = false;
        }

        rotation
    }
}
