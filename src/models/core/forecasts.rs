//! Analytic multi-step forecasts of the conditional mean and volatility.
//!
//! Purpose
//! -------
//! Roll the fitted ARMA-eGARCH recursion past the end of the sample to obtain
//! `E[r_{T+h}]` and a volatility path `σ_{T+h}` for `h = 1..H`.
//!
//! Key behaviors
//! -------------
//! - Step 1 is exact: `ln σ²_{T+1}` uses the last in-sample standardized
//!   residual.
//! - For `h ≥ 2` future shocks are replaced by their expectation, which for
//!   the eGARCH term gives `ln σ²_{T+h} = ω + β ln σ²_{T+h−1}` (the
//!   `α z` and `γ(|z| − E|z|)` terms have mean zero).
//! - Future residuals enter the ARMA mean as zero.
//!
//! Conventions
//! -----------
//! - `sigma` is `exp(½ ln σ²)` of the log-variance path; it is not the
//!   expectation of σ, which only the bootstrap can deliver.
//! - Every log-variance is clamped with the fitting guards.
use crate::models::{
    core::{
        guards::LogVarianceGuards,
        innovations::expected_abs_z,
        params::ArmaEgarchParams,
        recursion::{InSampleState, arma_mean, egarch_step},
        simulation::BootstrapForecast,
    },
    errors::{ModelError, ModelResult},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastStep {
    /// 1-based horizon.
    pub step: usize,
    pub mean: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub steps: Vec<ForecastStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<BootstrapForecast>,
}

impl ForecastResult {
    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn means(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.mean).collect()
    }

    pub fn sigmas(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.sigma).collect()
    }
}

/// Analytic `horizon`-step forecast from the end-of-sample state.
///
/// # Errors
/// `InvalidHorizon` when `horizon == 0`.
pub fn forecast_recursion(
    params: &ArmaEgarchParams, state: &InSampleState, horizon: usize, guards: &LogVarianceGuards,
) -> ModelResult<ForecastResult> {
    if horizon == 0 {
        return Err(ModelError::InvalidHorizon { horizon });
    }
    let e_abs = expected_abs_z(params.shape);
    let mut devs = state.dev_lags.clone();
    let mut resids = state.resid_lags.clone();
    let mut log_var = state.last_log_var;
    let mut steps = Vec::with_capacity(horizon);

    for step in 1..=horizon {
        log_var = if step == 1 {
            guards.clamp(egarch_step(params, e_abs, log_var, state.last_z))
        } else {
            guards.clamp(params.omega + params.beta * log_var)
        };
        let mean = arma_mean(params, &devs, &resids);
        devs.push(mean - params.mu);
        resids.push(0.0);
        steps.push(ForecastStep { step, mean, sigma: (0.5 * log_var).exp() });
    }
    Ok(ForecastResult { steps, bootstrap: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    fn params() -> ArmaEgarchParams {
        ArmaEgarchParams {
            mu: 0.001,
            ar: array![0.5],
            ma: Array1::zeros(0),
            omega: -0.4,
            alpha: -0.1,
            beta: 0.95,
            gamma: 0.15,
            shape: 7.0,
        }
    }

    #[test]
    // Purpose
    // -------
    // The volatility path converges toward exp(½ ω/(1−β)) and the mean path
    // decays toward μ.
    //
    // Given
    // -----
    // - AR(1) mean, β = 0.95, last log-variance well above the long-run level.
    //
    // Expect
    // ------
    // - 200-step σ within 1% of the long-run σ; σ strictly decreasing after
    //   step 1; final mean ≈ μ.
    fn paths_revert_to_long_run_levels() {
        let p = params();
        let state = InSampleState {
            dev_lags: vec![0.02],
            resid_lags: vec![],
            last_log_var: -6.0,
            last_z: 0.5,
        };
        let out = forecast_recursion(&p, &state, 200, &LogVarianceGuards::default()).unwrap();
        let sig = out.sigmas();
        let long_run = (0.5 * p.unconditional_log_var()).exp();

        assert_eq!(out.horizon(), 200);
        assert_relative_eq!(sig[199], long_run, max_relative = 1e-2);
        assert!(sig.windows(2).skip(1).all(|w| w[1] < w[0]));
        assert_relative_eq!(out.steps[199].mean, p.mu, epsilon = 1e-12);
        assert_relative_eq!(out.steps[0].mean, p.mu + 0.5 * 0.02);
    }

    #[test]
    // Purpose
    // -------
    // Step 1 uses the last standardized residual exactly.
    //
    // Given
    // -----
    // - last_log_var = −8, last_z = −2.
    //
    // Expect
    // ------
    // - ln σ²_{T+1} = ω + α(−2) + γ(2 − E|z|) + β(−8).
    fn first_step_uses_last_shock() {
        let p = params();
        let state =
            InSampleState { dev_lags: vec![0.0], resid_lags: vec![], last_log_var: -8.0, last_z: -2.0 };
        let out = forecast_recursion(&p, &state, 1, &LogVarianceGuards::default()).unwrap();
        let expected =
            -0.4 + (-0.1) * (-2.0) + 0.15 * (2.0 - expected_abs_z(7.0)) + 0.95 * (-8.0);
        assert_relative_eq!(out.steps[0].sigma, (0.5 * expected).exp(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The forecast recursion refuses an empty horizon.
    //
    // Given
    // -----
    // - Any end-of-sample state and `horizon = 0`.
    //
    // Expect
    // ------
    // - `InvalidHorizon { horizon: 0 }`.
    fn zero_horizon_is_rejected() {
        let state =
            InSampleState { dev_lags: vec![0.0], resid_lags: vec![], last_log_var: 0.0, last_z: 0.0 };
        assert_eq!(
            forecast_recursion(&params(), &state, 0, &LogVarianceGuards::default()),
            Err(ModelError::InvalidHorizon { horizon: 0 })
        );
    }
}
