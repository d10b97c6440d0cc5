//! statistical_tests::adf — Augmented Dickey–Fuller unit-root test.
//!
//! Purpose
//! -------
//! Test `H₀: the series has a unit root` against stationarity (around a
//! constant, or a constant plus linear trend).
//!
//! Key behaviors
//! -------------
//! - Regression: `Δyₜ = ρ yₜ₋₁ + c [+ δ t] + Σᵢ₌₁ᵏ bᵢ Δyₜ₋ᵢ + εₜ`, solved by
//!   OLS with `nalgebra`. The statistic is `τ = ρ̂ / se(ρ̂)`.
//! - Default lag order `k = trunc((n − 1)^(1/3))`.
//! - p-values from MacKinnon's (1994) response surface for one variable:
//!   `p = Φ(c₀ + c₁τ + c₂τ² [+ c₃τ³])`, using the small-p polynomial left of
//!   `τ*` and the large-p polynomial right of it; `p = 0` below `τ_min` and
//!   `p = 1` above `τ_max`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Needs `n ≥ 2k + d + 3` observations (`d` deterministic terms) so the
//!   regression has positive residual degrees of freedom.
//! - A constant series yields a singular design and is reported as
//!   [`StatError::SingularRegression`].
use crate::statistical_tests::{
    errors::{StatError, StatResult},
    outcome::TestOutcome,
    validation::{validate_series, validate_significance},
};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Deterministic terms in the test regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdfRegression {
    Constant,
    #[default]
    ConstantTrend,
}

impl AdfRegression {
    fn n_deterministic(self) -> usize {
        match self {
            AdfRegression::Constant => 1,
            AdfRegression::ConstantTrend => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdfOptions {
    pub regression: AdfRegression,
    /// Lagged differences; `None` uses `trunc((n − 1)^(1/3))`.
    pub lags: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdfOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub lags: usize,
    pub n_obs: usize,
    pub regression: AdfRegression,
}

impl AdfOutcome {
    /// Unit root rejected at level `alpha`.
    pub fn is_stationary(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    pub fn outcome(&self) -> TestOutcome {
        TestOutcome::new(self.statistic, self.p_value)
    }
}

pub fn default_lag(n: usize) -> usize {
    ((n.saturating_sub(1)) as f64).cbrt().trunc() as usize
}

/// Run the ADF test on `series`.
///
/// # Errors
/// `InsufficientData`, `InvalidData`, `SingularRegression` or `ZeroVariance`
/// (perfect fit, so `se(ρ̂) = 0`).
pub fn adf_test(series: &[f64], opts: &AdfOptions) -> StatResult<AdfOutcome> {
    let n = series.len();
    let k = opts.lags.unwrap_or_else(|| default_lag(n));
    let n_det = opts.regression.n_deterministic();
    validate_series(series, 2 * k + n_det + 3)?;

    let dy: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let m = dy.len() - k;
    let cols = 1 + n_det + k;

    let x = DMatrix::<f64>::from_fn(m, cols, |row, col| {
        let i = row + k;
        match col {
            0 => series[i],
            1 => 1.0,
            2 if n_det == 2 => (i + 1) as f64,
            _ => dy[i - (col - n_det)],
        }
    });
    let y = DVector::<f64>::from_fn(m, |row, _| dy[row + k]);

    let (coef, se) = ols_first_coefficient(&x, &y)?;
    let statistic = coef / se;
    Ok(AdfOutcome {
        statistic,
        p_value: mackinnon_p_value(statistic, opts.regression),
        lags: k,
        n_obs: m,
        regression: opts.regression,
    })
}

/// Convenience wrapper: ADF at `alpha` with default options.
pub fn is_stationary(series: &[f64], alpha: f64) -> StatResult<bool> {
    validate_significance(alpha)?;
    Ok(adf_test(series, &AdfOptions::default())?.is_stationary(alpha))
}

/// OLS estimate and standard error of the first regressor.
fn ols_first_coefficient(x: &DMatrix<f64>, y: &DVector<f64>) -> StatResult<(f64, f64)> {
    let (m, c) = x.shape();
    let xtx = x.transpose() * x;
    let xtx_inv = xtx.try_inverse().ok_or(StatError::SingularRegression)?;
    if xtx_inv.iter().any(|v| !v.is_finite()) {
        return Err(StatError::SingularRegression);
    }
    let beta = &xtx_inv * (x.transpose() * y);
    let resid = y - x * &beta;
    let s2 = resid.norm_squared() / (m - c) as f64;
    let var0 = s2 * xtx_inv[(0, 0)];
    if !(var0 > 0.0) {
        return Err(StatError::ZeroVariance);
    }
    Ok((beta[0], var0.sqrt()))
}

// MacKinnon (1994) response-surface coefficients, one I(1) variable.
const TAU_MAX_C: f64 = 2.74;
const TAU_MIN_C: f64 = -18.83;
const TAU_STAR_C: f64 = -1.61;
const SMALL_P_C: [f64; 3] = [2.1659, 1.4412, 0.038269];
const LARGE_P_C: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

const TAU_MAX_CT: f64 = 0.7;
const TAU_MIN_CT: f64 = -16.18;
const TAU_STAR_CT: f64 = -2.89;
const SMALL_P_CT: [f64; 3] = [3.2512, 1.6047, 0.049588];
const LARGE_P_CT: [f64; 4] = [2.5261, 0.61654, -0.37956, -0.060285];

/// Approximate asymptotic p-value of an ADF statistic.
pub fn mackinnon_p_value(tau: f64, regression: AdfRegression) -> f64 {
    let (tau_max, tau_min, tau_star, small, large) = match regression {
        AdfRegression::Constant => (TAU_MAX_C, TAU_MIN_C, TAU_STAR_C, &SMALL_P_C[..], &LARGE_P_C[..]),
        AdfRegression::ConstantTrend => {
            (TAU_MAX_CT, TAU_MIN_CT, TAU_STAR_CT, &SMALL_P_CT[..], &LARGE_P_CT[..])
        }
    };
    if tau.is_nan() {
        return f64::NAN;
    }
    if tau > tau_max {
        return 1.0;
    }
    if tau < tau_min {
        return 0.0;
    }
    let coefs = if tau <= tau_star { small } else { large };
    let z = coefs.iter().rev().fold(0.0, |acc, c| acc * tau + c);
    standard_normal_cdf(z)
}

fn standard_normal_cdf(z: f64) -> f64 {
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.cdf(z),
        Err(_) => f64::NAN,
    }
}
