//! Ljung–Box portmanteau test for serial correlation.
//!
//! `Q = n(n + 2) Σₖ₌₁ʰ ρ̂ₖ² / (n − k)`, referred to `χ²(h − fitdf)`.
//! `fitdf` is the number of ARMA coefficients when the input is a model's
//! residual series, and 0 otherwise.
use crate::statistical_tests::{
    autocorrelation::acf,
    errors::{StatError, StatResult},
    jarque_bera::chi_square_sf,
    outcome::TestOutcome,
};

pub fn ljung_box(data: &[f64], lags: usize, fitdf: usize) -> StatResult<TestOutcome> {
    if fitdf >= lags {
        return Err(StatError::InvalidLag { lag: lags, reason: "lags must exceed fitdf." });
    }
    let rho = acf(data, lags)?;
    let n = data.len() as f64;
    let q = n * (n + 2.0)
        * rho.iter().enumerate().map(|(i, r)| r * r / (n - (i + 1) as f64)).sum::<f64>();
    Ok(TestOutcome::new(q, chi_square_sf(q, (lags - fitdf) as f64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Q matches the closed form on a tiny alternating sample.
    //
    // Given
    // -----
    // - x = [1, −1, 1, −1, 1, −1], lags = 1: ρ̂₁ = −5/6, n = 6.
    //
    // Expect
    // ------
    // - Q = 6·8·(25/36)/5 = 20/3, with a small p-value.
    fn statistic_matches_closed_form() {
        let out = ljung_box(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0], 1, 0).unwrap();
        assert_relative_eq!(out.statistic, 20.0 / 3.0, epsilon = 1e-12);
        assert!(out.p_value < 0.01);
    }

    #[test]
    // Purpose
    // -------
    // Ljung–Box needs positive degrees of freedom.
    //
    // Given
    // -----
    // - lags = fitdf = 2.
    //
    // Expect
    // ------
    // - `InvalidLag`.
    fn fitdf_must_be_below_lags() {
        let data: Vec<f64> = (0..20).map(|i| (i as f64).sin()).collect();
        assert!(matches!(ljung_box(&data, 2, 2), Err(StatError::InvalidLag { .. })));
    }
}
