//! Calculator configuration

use crate::numeric::{EPS, SQRT_EPS};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two tolerance scales used by the edge/plane test
///
/// `eps` decides when an edge has zero length; `sqrt_eps` is how close a
/// degenerate edge must be to the plane, and how far outside `[0, 1]` an edge
/// parameter may fall and still count as a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerances {
    /// Near-zero vector threshold
    pub eps: f64,
    /// Near-boundary threshold
    pub sqrt_eps: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            eps: EPS,
            sqrt_eps: SQRT_EPS,
        }
    }
}

/// When the plane path clamps its running min/max into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClampPolicy {
    /// Clamp after every accepted edge intersection
    #[default]
    PerIntersection,
    /// Clamp once after all edges of all planes were processed
    Once,
}

/// Configuration for [`ClippedSurfaceBoundsCalculator`](crate::ClippedSurfaceBoundsCalculator)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorConfig {
    tolerances: Tolerances,
    clamp_policy: ClampPolicy,
}

impl CalculatorConfig {
    /// Default tolerances, clamping after every intersection
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Choose when the plane path clamps
    pub fn with_clamp_policy(mut self, clamp_policy: ClampPolicy) -> Self {
        self.clamp_policy = clamp_policy;
        self
    }

    /// Current tolerances
    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Current clamp policy
    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp_policy
    }
}
