//! In-sample filter for ARMA(p, q)-eGARCH(1,1)-t.
//!
//! Purpose
//! -------
//! Run the joint mean/variance recursion over a return sample and produce
//! residuals, log-variances, standardized residuals, and log-likelihood
//! contributions. The same step functions drive forecasting and simulation.
//!
//! Key behaviors
//! -------------
//! - Mean: `m_t = μ + Σ φ_i (r_{t−i} − μ) + Σ θ_j e_{t−j}`, `e_t = r_t − m_t`,
//!   with pre-sample deviations and residuals equal to zero.
//! - Variance: `ln σ²_0` is the sample anchor; for `t ≥ 1`
//!   `ln σ²_t = ω + α z_{t−1} + γ(|z_{t−1}| − E|z|) + β ln σ²_{t−1}`,
//!   clamped by [`LogVarianceGuards`].
//! - `loglik` is the plain sum of the per-observation terms.
//!
//! Invariants
//! ----------
//! - Histories passed to [`arma_mean`] are ordered oldest → newest; lags are
//!   read from the end.
use crate::models::{
    core::{
        data::ReturnData, guards::LogVarianceGuards, innovations::StandardizedStudentT,
        params::ArmaEgarchParams,
    },
    errors::ModelResult,
};
use serde::Serialize;

/// End-of-sample state needed to continue the recursion out of sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InSampleState {
    /// Last `p` mean deviations `r − μ`, oldest first.
    pub dev_lags: Vec<f64>,
    /// Last `q` residuals, oldest first.
    pub resid_lags: Vec<f64>,
    pub last_log_var: f64,
    pub last_z: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutput {
    pub residuals: Vec<f64>,
    pub log_var: Vec<f64>,
    pub std_resid: Vec<f64>,
    pub loglik_terms: Vec<f64>,
    pub loglik: f64,
    pub state: InSampleState,
}

impl FilterOutput {
    /// Conditional standard deviations `exp(½ ln σ²_t)`.
    pub fn sigma(&self) -> Vec<f64> {
        self.log_var.iter().map(|lv| (0.5 * lv).exp()).collect()
    }
}

/// Conditional mean given histories of deviations and residuals.
///
/// Lags beyond the available history contribute zero.
#[inline]
pub fn arma_mean(params: &ArmaEgarchParams, devs: &[f64], resids: &[f64]) -> f64 {
    let mut m = params.mu;
    for (i, phi) in params.ar.iter().enumerate() {
        if let Some(k) = devs.len().checked_sub(i + 1) {
            m += phi * devs[k];
        }
    }
    for (j, theta) in params.ma.iter().enumerate() {
        if let Some(k) = resids.len().checked_sub(j + 1) {
            m += theta * resids[k];
        }
    }
    m
}

/// One unclamped eGARCH(1,1) step.
#[inline]
pub fn egarch_step(params: &ArmaEgarchParams, e_abs: f64, prev_log_var: f64, prev_z: f64) -> f64 {
    params.omega
        + params.alpha * prev_z
        + params.gamma * (prev_z.abs() - e_abs)
        + params.beta * prev_log_var
}

/// Run the filter over `data`.
///
/// # Errors
/// Propagates `InvalidParams` from the innovation law when `shape ≤ 2`.
pub fn filter(
    params: &ArmaEgarchParams, data: &ReturnData, guards: &LogVarianceGuards,
) -> ModelResult<FilterOutput> {
    let dist = StandardizedStudentT::new(params.shape)?;
    let e_abs = dist.expected_abs();
    let n = data.len();

    let devs: Vec<f64> = data.values.iter().map(|r| r - params.mu).collect();
    let mut residuals = Vec::with_capacity(n);
    let mut log_var = Vec::with_capacity(n);
    let mut std_resid = Vec::with_capacity(n);
    let mut loglik_terms = Vec::with_capacity(n);

    for t in 0..n {
        let mean = arma_mean(params, &devs[..t], &residuals);
        let e = data.values[t] - mean;
        let lv = if t == 0 {
            guards.clamp(data.log_var0)
        } else {
            guards.clamp(egarch_step(params, e_abs, log_var[t - 1], std_resid[t - 1]))
        };
        let z = e / (0.5 * lv).exp();

        loglik_terms.push(dist.loglik(e, lv));
        residuals.push(e);
        log_var.push(lv);
        std_resid.push(z);
    }

    let loglik = loglik_terms.iter().sum();
    let state = InSampleState {
        dev_lags: tail(&devs, params.ar.len()),
        resid_lags: tail(&residuals, params.ma.len()),
        last_log_var: log_var.last().copied().unwrap_or(data.log_var0),
        last_z: std_resid.last().copied().unwrap_or(0.0),
    };
    Ok(FilterOutput { residuals, log_var, std_resid, loglik_terms, loglik, state })
}

fn tail(xs: &[f64], k: usize) -> Vec<f64> {
    xs[xs.len().saturating_sub(k)..].to_vec()
}
