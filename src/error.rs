//! Error types for geometry construction and calculator input
//!
//! "No intersection" is never an error: the bounds calculator reports it with a
//! sentinel range. Errors are reserved for inputs that cannot describe a valid
//! geometry or calculator state.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Geometry construction errors
//! - **E2xxx**: Calculator input errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: Index-to-world matrix is not invertible
//! - `E1002`: Zero-length normal, axis or direction vector
//! - `E1003`: Non-positive plane or grid extent
//! - `E2001`: Calculator input or grid missing
//! - `E2002`: Empty point list
//! - `E2003`: Axis index out of range

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building geometries or configuring the bounds calculator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The linear part of an index-to-world transform cannot be inverted
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Zero spacing along one axis
    /// - Two axis vectors that are collinear
    #[error("[E1001] Singular index-to-world transform: {0}")]
    SingularTransform(String),

    /// A vector that must have a direction has (near-)zero length
    ///
    /// **Error Code**: E1002
    #[error("[E1002] Degenerate vector: {0}")]
    DegenerateVector(String),

    /// Plane or grid extents are not positive
    ///
    /// **Error Code**: E1003
    #[error("[E1003] Invalid bounds: {0}")]
    InvalidBounds(String),

    /// A calculator input or its grid geometry was not supplied
    ///
    /// **Error Code**: E2001
    ///
    /// The calculator keeps its previous state when this is returned.
    #[error("[E2001] Missing calculator input: {0}")]
    MissingInput(String),

    /// A point-list input contained no points
    ///
    /// **Error Code**: E2002
    #[error("[E2002] Point list is empty")]
    EmptyPointList,

    /// An axis index outside `0..3` was requested
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Axis {0} is out of range (expected 0, 1 or 2)")]
    AxisOutOfRange(usize),
}

impl Error {
    /// The `E<category><number>` code of this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::SingularTransform(_) => "E1001",
            Error::DegenerateVector(_) => "E1002",
            Error::InvalidBounds(_) => "E1003",
            Error::MissingInput(_) => "E2001",
            Error::EmptyPointList => "E2002",
            Error::AxisOutOfRange(_) => "E2003",
        }
    }

    /// Create a DegenerateVector error naming the offending vector
    ///
    /// # Arguments
    /// * `what` - Which vector was degenerate (e.g., "plane normal")
    /// * `length` - The measured length of the vector
    pub fn degenerate_vector(what: &str, length: f64) -> Self {
        Error::DegenerateVector(format!("{} has length {:e}", what, length))
    }

    /// Create an InvalidBounds error for a single axis
    pub fn invalid_extent(axis: usize, extent: f64) -> Self {
        Error::InvalidBounds(format!(
            "extent along axis {} is out of range: {}",
            axis, extent
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let singular = Error::SingularTransform("column 2 is zero".to_string());
        assert!(singular.to_string().contains("[E1001]"));
        assert_eq!(singular.code(), "E1001");

        let missing = Error::MissingInput("grid".to_string());
        assert!(missing.to_string().contains("[E2001]"));

        assert!(Error::EmptyPointList.to_string().contains("[E2002]"));
        assert_eq!(Error::AxisOutOfRange(3).code(), "E2003");
    }

    #[test]
    fn test_degenerate_vector_helper() {
        let err = Error::degenerate_vector("plane normal", 0.0);
        assert!(err.to_string().contains("plane normal"));
        assert!(err.to_string().contains("[E1002]"));
    }

    #[test]
    fn test_invalid_extent_helper() {
        let err = Error::invalid_extent(1, -2.0);
        assert!(err.to_string().contains("axis 1"));
        assert!(err.to_string().contains("-2"));
        assert_eq!(err.code(), "E1003");
    }
}
