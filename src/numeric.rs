//! Scalar types, tolerances and the rounding policy shared by all geometry code
//!
//! Points and vectors are distinct nalgebra types, so adding two points does
//! not type-check while `point + vector` and `point - point` do.

/// A position in 3D space (world or index coordinates)
pub type Point3D = nalgebra::Point3<f64>;

/// A displacement or direction in 3D space
pub type Vector3D = nalgebra::Vector3<f64>;

/// A position in a plane's 2D parametrization
pub type Point2D = nalgebra::Point2<f64>;

/// A displacement in a plane's 2D parametrization
pub type Vector2D = nalgebra::Vector2<f64>;

/// 3x3 matrix used for the linear part of affine transforms
pub type Matrix3D = nalgebra::Matrix3<f64>;

/// Tolerance for near-zero vectors and denominators
pub const EPS: f64 = f64::EPSILON * 100.0;

/// Larger tolerance for near-boundary parametric hits and distances to degenerate points
///
/// Must stay well above [`EPS`].
pub const SQRT_EPS: f64 = 1.490_116_119_384_765_6e-8 * 100.0;

/// Parallel-to-face threshold used by box/line intersection
pub const BOX_EPS: f64 = 1e-10;

/// Round to the nearest integer, with halves rounded away from zero
///
/// `2.5 -> 3`, `-2.5 -> -3`. Values beyond the `i32` range saturate and NaN maps to 0.
#[inline]
pub fn round_half_away_from_zero(x: f64) -> i32 {
    let rounded = if x >= 0.0 {
        (x + 0.5).floor()
    } else {
        (x - 0.5).ceil()
    };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_halves_away_from_zero() {
        assert_eq!(round_half_away_from_zero(2.5), 3);
        assert_eq!(round_half_away_from_zero(-2.5), -3);
        assert_eq!(round_half_away_from_zero(0.5), 1);
        assert_eq!(round_half_away_from_zero(-0.5), -1);
        assert_eq!(round_half_away_from_zero(19.5), 20);
    }

    #[test]
    fn test_round_non_halves() {
        assert_eq!(round_half_away_from_zero(2.49), 2);
        assert_eq!(round_half_away_from_zero(-2.49), -2);
        assert_eq!(round_half_away_from_zero(-0.4999), 0);
        assert_eq!(round_half_away_from_zero(0.0), 0);
    }

    #[test]
    fn test_round_saturates() {
        assert_eq!(round_half_away_from_zero(1e12), i32::MAX);
        assert_eq!(round_half_away_from_zero(-1e12), i32::MIN);
        assert_eq!(round_half_away_from_zero(f64::NAN), 0);
    }

    #[test]
    fn test_tolerances_are_ordered() {
        assert!(EPS < BOX_EPS);
        assert!(BOX_EPS < SQRT_EPS);
    }
}
