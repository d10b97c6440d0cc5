//! Options for estimation and bootstrap forecasting.
//!
//! Purpose
//! -------
//! Collect the configuration knobs for fitting ARMA-eGARCH candidates and for
//! simulating bootstrap forecast paths in one place, so call sites pass
//! explicit, validated options instead of ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - [`FitOptions`] bundles optimizer settings with the log-variance guards
//!   used by the filter.
//! - [`BootstrapOptions`] fixes the number of paths, the resampling mode,
//!   the reported quantile levels, and the RNG seed.
//!
//! Conventions
//! -----------
//! - Defaults are tuned for daily log returns of a liquid equity over a few
//!   years of history.
use crate::{
    models::{
        core::guards::LogVarianceGuards,
        errors::{ModelError, ModelResult},
    },
    optimization::loglik_optimizer::{MLEOptions, Tolerances},
};
use serde::{Deserialize, Serialize};

/// Gradient tolerance on the mean log-likelihood per observation.
pub const DEFAULT_TOL_GRAD: f64 = 1e-5;
pub const DEFAULT_TOL_COST: f64 = 1e-12;
pub const DEFAULT_MAX_ITER: usize = 5_000;

/// Estimation-time configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// L-BFGS tolerances, line search, and memory.
    pub mle_opts: MLEOptions,
    /// Bounds on `ln σ²` inside the recursion.
    pub guards: LogVarianceGuards,
}

impl FitOptions {
    pub fn new(mle_opts: MLEOptions, guards: LogVarianceGuards) -> Self {
        FitOptions { mle_opts, guards }
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        let tols = Tolerances {
            tol_grad: Some(DEFAULT_TOL_GRAD),
            tol_cost: Some(DEFAULT_TOL_COST),
            max_iter: Some(DEFAULT_MAX_ITER),
        };
        FitOptions {
            mle_opts: MLEOptions { tols, ..MLEOptions::default() },
            guards: LogVarianceGuards::default(),
        }
    }
}

/// How parameter uncertainty enters bootstrap paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapMode {
    /// Resample innovations only; parameters fixed at the estimate.
    #[default]
    Partial,
    /// Also re-estimate on `n_bootfit` simulated training series and spread
    /// the paths across the re-estimated parameter sets.
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapOptions {
    pub n_paths: usize,
    pub mode: BootstrapMode,
    /// Reported quantile levels, each in `(0, 1)`.
    pub quantiles: Vec<f64>,
    /// Number of parameter re-estimations in [`BootstrapMode::Full`].
    pub n_bootfit: usize,
    pub seed: u64,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        BootstrapOptions {
            n_paths: 500,
            mode: BootstrapMode::Partial,
            quantiles: vec![0.05, 0.5, 0.95],
            n_bootfit: 100,
            seed: 42,
        }
    }
}

impl BootstrapOptions {
    pub fn validate(&self) -> ModelResult<()> {
        if self.n_paths == 0 {
            return Err(ModelError::InvalidBootstrapOptions { reason: "n_paths must be at least 1." });
        }
        if self.quantiles.is_empty() {
            return Err(ModelError::InvalidBootstrapOptions {
                reason: "at least one quantile level is required.",
            });
        }
        if self.quantiles.iter().any(|q| !(q.is_finite() && *q > 0.0 && *q < 1.0)) {
            return Err(ModelError::InvalidBootstrapOptions {
                reason: "quantile levels must lie strictly between 0 and 1.",
            });
        }
        if self.mode == BootstrapMode::Full && self.n_bootfit == 0 {
            return Err(ModelError::InvalidBootstrapOptions {
                reason: "full bootstrap needs n_bootfit >= 1.",
            });
        }
        Ok(())
    }
}
