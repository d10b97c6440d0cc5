use crate::models::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Clamp range for `ln σ²ₜ` inside the variance recursion.
///
/// Keeps `exp(ln σ²)` finite and strictly positive however far the optimizer
/// wanders; the defaults `[-50, 50]` are never active at realistic
/// parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogVarianceGuards {
    pub min: f64,
    pub max: f64,
}

impl LogVarianceGuards {
    pub fn new(min: f64, max: f64) -> ModelResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ModelError::InvalidLogVarGuards {
                min,
                max,
                reason: "Log-variance guards must be finite.",
            });
        }
        if min >= max {
            return Err(ModelError::InvalidLogVarGuards {
                min,
                max,
                reason: "Log-variance guards must have min < max.",
            });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn clamp(&self, log_var: f64) -> f64 {
        if log_var.is_nan() { self.max } else { log_var.clamp(self.min, self.max) }
    }
}

impl Default for LogVarianceGuards {
    fn default() -> Self {
        Self { min: -50.0, max: 50.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Ordered finite bounds are stored as given.
    //
    // Given
    // -----
    // - min = -10, max = 10.
    //
    // Expect
    // ------
    // - Guards with exactly those bounds.
    fn new_accepts_ordered_finite_bounds() {
        let g = LogVarianceGuards::new(-10.0, 10.0).unwrap();
        assert_eq!((g.min, g.max), (-10.0, 10.0));
    }

    #[test]
    // Purpose
    // -------
    // Degenerate bounds are rejected.
    //
    // Given
    // -----
    // - min == max; an infinite lower bound.
    //
    // Expect
    // ------
    // - `InvalidLogVarGuards` for both.
    fn new_rejects_inverted_or_infinite_bounds() {
        assert!(matches!(
            LogVarianceGuards::new(1.0, 1.0),
            Err(ModelError::InvalidLogVarGuards { .. })
        ));
        assert!(matches!(
            LogVarianceGuards::new(f64::NEG_INFINITY, 1.0),
            Err(ModelError::InvalidLogVarGuards { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `clamp` keeps ln σ² inside the default guards.
    //
    // Given
    // -----
    // - -80 (below), 3 (inside), NaN.
    //
    // Expect
    // ------
    // - -50, 3, and 50 respectively.
    fn clamp_bounds_values_and_maps_nan_to_max() {
        let g = LogVarianceGuards::default();
        assert_eq!(g.clamp(-80.0), -50.0);
        assert_eq!(g.clamp(3.0), 3.0);
        assert_eq!(g.clamp(f64::NAN), 50.0);
    }
}
