use crate::statistical_tests::errors::{StatError, StatResult};

/// Require at least `needed` finite observations.
pub fn validate_series(data: &[f64], needed: usize) -> StatResult<()> {
    if data.len() < needed {
        return Err(StatError::InsufficientData { needed, found: data.len() });
    }
    if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(StatError::InvalidData { index, value });
    }
    Ok(())
}

/// Require `1 ≤ lag < n`.
pub fn validate_lag(lag: usize, n: usize) -> StatResult<()> {
    if lag == 0 || lag >= n {
        return Err(StatError::InvalidLag { lag, reason: "must satisfy 1 ≤ lag < n." });
    }
    Ok(())
}

pub fn validate_significance(alpha: f64) -> StatResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StatError::InvalidSignificance { alpha });
    }
    Ok(())
}

pub(crate) fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Biased (1/n) central moment of order `k`.
pub(crate) fn central_moment(data: &[f64], mean: f64, k: i32) -> f64 {
    data.iter().map(|x| (x - mean).powi(k)).sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The first non-finite value is the one reported.
    //
    // Given
    // -----
    // - [0.1, 0.2, ∞, NaN].
    //
    // Expect
    // ------
    // - `InvalidData` at index 2 with an infinite value.
    fn validate_series_reports_first_non_finite_value() {
        let data = [0.1, 0.2, f64::INFINITY, f64::NAN];
        match validate_series(&data, 2) {
            Err(StatError::InvalidData { index, value }) => {
                assert_eq!(index, 2);
                assert!(value.is_infinite());
            }
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Series shorter than required are rejected.
    //
    // Given
    // -----
    // - One value where three are needed.
    //
    // Expect
    // ------
    // - `InsufficientData { needed: 3, found: 1 }`.
    fn validate_series_rejects_short_input() {
        assert_eq!(
            validate_series(&[1.0], 3),
            Err(StatError::InsufficientData { needed: 3, found: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Lags must lie in 1..n.
    //
    // Given
    // -----
    // - n = 5 and lags 0, 1, 4, 5.
    //
    // Expect
    // ------
    // - 1 and 4 accepted; 0 and 5 rejected.
    fn validate_lag_bounds() {
        assert!(validate_lag(1, 5).is_ok());
        assert!(validate_lag(4, 5).is_ok());
        assert!(validate_lag(0, 5).is_err());
        assert!(validate_lag(5, 5).is_err());
    }
}
