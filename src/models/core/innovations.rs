//! Standardized Student-t innovations.
//!
//! `z = e / σ` follows a Student-t with `ν > 2` degrees of freedom rescaled to
//! unit variance. The per-observation log density of `e` given `ln σ²` is
//!
//! `lnΓ((ν+1)/2) − lnΓ(ν/2) − ½ ln(π(ν−2)) − ½ ln σ² − ((ν+1)/2) ln(1 + e²/((ν−2)σ²))`.
use crate::models::errors::{ModelError, ModelResult};
use rand::Rng;
use rand_distr::{Distribution, StudentT};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardizedStudentT {
    nu: f64,
    /// ν-only part of the log density, cached.
    log_norm: f64,
}

impl StandardizedStudentT {
    pub fn new(nu: f64) -> ModelResult<Self> {
        if !nu.is_finite() || nu <= 2.0 {
            return Err(ModelError::InvalidParams {
                name: "shape".to_string(),
                value: nu,
                reason: "Student-t degrees of freedom must be finite and > 2.",
            });
        }
        let log_norm = ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu) - 0.5 * (PI * (nu - 2.0)).ln();
        Ok(Self { nu, log_norm })
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Log density of residual `e` when `ln σ² = log_var`.
    #[inline]
    pub fn loglik(&self, e: f64, log_var: f64) -> f64 {
        let var = log_var.exp();
        self.log_norm
            - 0.5 * log_var
            - 0.5 * (self.nu + 1.0) * (e * e / ((self.nu - 2.0) * var)).ln_1p()
    }

    /// `E|z|` for unit-variance `z`.
    pub fn expected_abs(&self) -> f64 {
        expected_abs_z(self.nu)
    }

    /// `n` unit-variance draws.
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> ModelResult<Vec<f64>> {
        let dist = StudentT::new(self.nu).map_err(|_| ModelError::InvalidParams {
            name: "shape".to_string(),
            value: self.nu,
            reason: "Student-t degrees of freedom rejected by the sampler.",
        })?;
        let scale = ((self.nu - 2.0) / self.nu).sqrt();
        Ok((0..n).map(|_| dist.sample(rng) * scale).collect())
    }
}

/// `E|z| = sqrt(ν−2) Γ((ν−1)/2) / (sqrt(π) Γ(ν/2))`.
pub fn expected_abs_z(nu: f64) -> f64 {
    ((nu - 2.0).sqrt() / PI.sqrt()) * (ln_gamma(0.5 * (nu - 1.0)) - ln_gamma(0.5 * nu)).exp()
}
