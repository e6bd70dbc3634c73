use std::f64::consts::FRAC_PI_4;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tetra_kernel::BoundingBox;

use crate::error::GenerationError;

/// Sampling policy for [`crate::PairGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Box every sampled point is drawn from.
    pub domain: BoundingBox,
    /// Lower bound of the radius drawn for spherical samples. Directions
    /// whose distance to the domain wall does not exceed it are rejected.
    pub min_radius: f64,
    /// Polar angles are drawn from `(margin, pi/2 - margin)`, keeping
    /// samples off the face plane and away from the pole.
    pub angular_margin: f64,
    /// Wall-clock budget for sampling against one seed tetrahedron.
    pub attempt_timeout: Duration,
    /// Seed tetrahedra tried before giving up on a pair.
    pub max_restarts: usize,
    /// Point draws allowed when building one non-degenerate tetrahedron.
    pub max_degenerate_draws: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            domain: BoundingBox::unit(),
            min_radius: 1e-4,
            angular_margin: 0.1,
            attempt_timeout: Duration::from_secs(3),
            max_restarts: 1000,
            max_degenerate_draws: 10_000,
        }
    }
}

impl GeneratorConfig {
    /// Check that every sampling range is non-empty.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.domain.is_valid() {
            return Err(invalid("domain must be finite with min < max on every axis"));
        }
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(invalid("min_radius must be positive"));
        }
        if !(self.angular_margin >= 0.0 && self.angular_margin < FRAC_PI_4) {
            return Err(invalid("angular_margin must lie in [0, pi/4)"));
        }
        if self.attempt_timeout.is_zero() {
            return Err(invalid("attempt_timeout must be non-zero"));
        }
        if self.max_restarts == 0 {
            return Err(invalid("max_restarts must be at least 1"));
        }
        if self.max_degenerate_draws == 0 {
            return Err(invalid("max_degenerate_draws must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> GenerationError {
    GenerationError::InvalidConfig(reason.to_string())
}
