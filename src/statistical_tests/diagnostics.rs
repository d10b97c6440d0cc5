//! Exploratory diagnostics bundle.
//!
//! Runs the stationarity, autocorrelation, normality and independence checks
//! on prices and returns in one call. The results are advisory: nothing in
//! the pipeline branches on them.
use crate::statistical_tests::{
    adf::{AdfOptions, AdfOutcome, adf_test},
    autocorrelation::{AcfEntry, autocorrelation_profile},
    errors::StatResult,
    jarque_bera::jarque_bera,
    ljung_box::ljung_box,
    outcome::TestOutcome,
    validation::validate_significance,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsOptions {
    pub adf: AdfOptions,
    /// Largest lag of the ACF/PACF profiles; clipped to `n − 1`.
    pub max_lag: usize,
    /// Ljung–Box lag count; clipped to `n − 1`.
    pub ljung_box_lags: usize,
    pub significance: f64,
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self { adf: AdfOptions::default(), max_lag: 20, ljung_box_lags: 10, significance: 0.05 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub price_adf: AdfOutcome,
    pub return_adf: AdfOutcome,
    pub return_acf: Vec<AcfEntry>,
    pub squared_return_acf: Vec<AcfEntry>,
    pub jarque_bera: TestOutcome,
    pub ljung_box: TestOutcome,
    /// Ljung–Box on squared returns (volatility clustering).
    pub ljung_box_squared: TestOutcome,
    pub significance: f64,
    pub prices_stationary: bool,
    pub returns_stationary: bool,
    pub returns_normal: bool,
    pub returns_autocorrelated: bool,
}

impl Diagnostics {
    pub fn run(prices: &[f64], returns: &[f64], opts: &DiagnosticsOptions) -> StatResult<Self> {
        validate_significance(opts.significance)?;
        let alpha = opts.significance;
        let n = returns.len();
        let max_lag = opts.max_lag.min(n.saturating_sub(1)).max(1);
        let lb_lags = opts.ljung_box_lags.min(n.saturating_sub(1)).max(1);
        let squared: Vec<f64> = returns.iter().map(|r| r * r).collect();

        let price_adf = adf_test(prices, &opts.adf)?;
        let return_adf = adf_test(returns, &opts.adf)?;
        let jb = jarque_bera(returns)?;
        let lb = ljung_box(returns, lb_lags, 0)?;
        let lb_squared = ljung_box(&squared, lb_lags, 0)?;

        Ok(Self {
            prices_stationary: price_adf.is_stationary(alpha),
            returns_stationary: return_adf.is_stationary(alpha),
            returns_normal: !jb.rejects_null(alpha),
            returns_autocorrelated: lb.rejects_null(alpha),
            price_adf,
            return_adf,
            return_acf: autocorrelation_profile(returns, max_lag)?,
            squared_return_acf: autocorrelation_profile(&squared, max_lag)?,
            jarque_bera: jb,
            ljung_box: lb,
            ljung_box_squared: lb_squared,
            significance: alpha,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::errors::StatError;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, StudentT};

    #[test]
    // Purpose
    // -------
    // The bundle flags fat-tailed iid returns as stationary and non-normal,
    // and their compounded prices as non-stationary.
    //
    // Given
    // -----
    // - 800 iid Student-t(4) returns scaled by 0.01 plus a 0.002 drift.
    //
    // Expect
    // ------
    // - returns_stationary, !prices_stationary, !returns_normal.
    // - Profiles of length `max_lag`.
    fn run_flags_fat_tailed_returns() {
        let mut rng = StdRng::seed_from_u64(11);
        let t = StudentT::new(4.0).unwrap();
        let returns: Vec<f64> = (0..800).map(|_| 0.002 + 0.01 * t.sample(&mut rng)).collect();
        let mut log_p: f64 = 3.0;
        let mut prices = vec![log_p.exp()];
        for r in &returns {
            log_p += r;
            prices.push(f64::exp(log_p));
        }

        let diag = Diagnostics::run(&prices, &returns, &DiagnosticsOptions::default()).unwrap();

        assert!(diag.returns_stationary);
        assert!(!diag.prices_stationary, "price p = {}", diag.price_adf.p_value);
        assert!(!diag.returns_normal);
        assert_eq!(diag.return_acf.len(), 20);
        assert_eq!(diag.squared_return_acf.len(), 20);
    }

    #[test]
    // Purpose
    // -------
    // The diagnostics battery validates its significance level.
    //
    // Given
    // -----
    // - α = 1.5.
    //
    // Expect
    // ------
    // - `InvalidSignificance { alpha: 1.5 }`.
    fn run_rejects_bad_significance() {
        let x: Vec<f64> = (0..50).map(|i| (i as f64 * 0.7).sin()).collect();
        let opts = DiagnosticsOptions { significance: 1.5, ..Default::default() };
        assert_eq!(
            Diagnostics::run(&x, &x, &opts),
            Err(StatError::InvalidSignificance { alpha: 1.5 })
        );
    }
}
