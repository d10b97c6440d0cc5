//! Jarque–Bera normality test.
//!
//! `JB = n/6 · (S² + (K − 3)²/4)` with biased sample skewness `S` and
//! kurtosis `K`; asymptotically `χ²(2)` under normality.
use crate::statistical_tests::{
    errors::{StatError, StatResult},
    outcome::TestOutcome,
    validation::{central_moment, mean, validate_series},
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

pub fn jarque_bera(data: &[f64]) -> StatResult<TestOutcome> {
    validate_series(data, 3)?;
    let n = data.len() as f64;
    let m = mean(data);
    let m2 = central_moment(data, m, 2);
    if m2 <= 0.0 {
        return Err(StatError::ZeroVariance);
    }
    let skew = central_moment(data, m, 3) / m2.powf(1.5);
    let kurt = central_moment(data, m, 4) / (m2 * m2);
    let stat = n / 6.0 * (skew * skew + (kurt - 3.0).powi(2) / 4.0);
    Ok(TestOutcome::new(stat, chi_square_sf(stat, 2.0)))
}

/// Upper tail `P(χ²(df) > x)`.
pub(crate) fn chi_square_sf(x: f64, df: f64) -> f64 {
    match ChiSquared::new(df) {
        Ok(dist) => 1.0 - dist.cdf(x),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // A symmetric two-point sample has zero skewness and kurtosis 1.
    //
    // Given
    // -----
    // - x = [−1, 1, −1, 1] (n = 4).
    //
    // Expect
    // ------
    // - JB = 4/6 · (0 + 4/4) = 2/3; p = exp(−JB/2).
    fn two_point_sample_statistic() {
        let out = jarque_bera(&[-1.0, 1.0, -1.0, 1.0]).unwrap();
        assert_relative_eq!(out.statistic, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out.p_value, (-1.0_f64 / 3.0).exp(), epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Heavy tails are detected.
    //
    // Given
    // -----
    // - 200 observations: mostly ±0.1 with four ±10 outliers.
    //
    // Expect
    // ------
    // - Normality rejected at 1%.
    fn heavy_tails_reject_normality() {
        let mut data: Vec<f64> = (0..200).map(|i| if i % 2 == 0 { 0.1 } else { -0.1 }).collect();
        data[10] = 10.0;
        data[50] = -10.0;
        data[90] = 10.0;
        data[150] = -10.0;
        assert!(jarque_bera(&data).unwrap().rejects_null(0.01));
    }
}
