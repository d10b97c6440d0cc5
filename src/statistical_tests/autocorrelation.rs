//! Sample ACF and PACF.
//!
//! - ACF uses the biased denominator: `ρ̂ₖ = Σₜ (xₜ − x̄)(xₜ₋ₖ − x̄) / Σₜ (xₜ − x̄)²`.
//! - PACF comes from the Durbin–Levinson recursion on the ACF.
use crate::statistical_tests::{
    errors::{StatError, StatResult},
    validation::{mean, validate_lag, validate_series},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcfEntry {
    pub lag: usize,
    pub acf: f64,
    pub pacf: f64,
}

/// Autocorrelations `ρ̂₁ … ρ̂_max_lag`.
pub fn acf(data: &[f64], max_lag: usize) -> StatResult<Vec<f64>> {
    validate_series(data, 2)?;
    validate_lag(max_lag, data.len())?;
    let m = mean(data);
    let denom: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    if denom <= 0.0 {
        return Err(StatError::ZeroVariance);
    }
    Ok((1..=max_lag)
        .map(|k| {
            data[k..].iter().zip(data).map(|(xt, xtk)| (xt - m) * (xtk - m)).sum::<f64>() / denom
        })
        .collect())
}

/// Partial autocorrelations from autocorrelations `rho[0] = ρ̂₁, …`.
pub fn pacf_from_acf(rho: &[f64]) -> Vec<f64> {
    let p = rho.len();
    let mut pacf = Vec::with_capacity(p);
    let mut phi: Vec<f64> = Vec::with_capacity(p);
    for k in 0..p {
        let num = rho[k] - (0..k).map(|j| phi[j] * rho[k - 1 - j]).sum::<f64>();
        let den = 1.0 - (0..k).map(|j| phi[j] * rho[j]).sum::<f64>();
        let phi_kk = if den.abs() > f64::EPSILON { num / den } else { 0.0 };
        let prev = phi.clone();
        for j in 0..k {
            phi[j] = prev[j] - phi_kk * prev[k - 1 - j];
        }
        phi.push(phi_kk);
        pacf.push(phi_kk);
    }
    pacf
}

/// `(lag, acf, pacf)` for `lag = 1..=max_lag`.
///
/// # Errors
/// `InsufficientData`, `InvalidData`, `InvalidLag` unless `1 ≤ max_lag < n`,
/// `ZeroVariance` for a constant series.
pub fn autocorrelation_profile(data: &[f64], max_lag: usize) -> StatResult<Vec<AcfEntry>> {
    let rho = acf(data, max_lag)?;
    let pacf = pacf_from_acf(&rho);
    Ok(rho
        .iter()
        .zip(pacf)
        .enumerate()
        .map(|(i, (&acf, pacf))| AcfEntry { lag: i + 1, acf, pacf })
        .collect())
}
