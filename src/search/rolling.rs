//! Rolling-origin re-estimation and forecasting over a holdout.
//!
//! For roll `k` in `0..n_rolls` the estimation window is the first
//! `n − holdout_size + k` returns. Each roll refits the specification from
//! scratch and forecasts `horizon` steps; the realised returns that exist
//! after the window are stored next to the forecast for comparison.
use crate::{
    models::{
        arma_egarch::{FitStatus, fit},
        core::{forecasts::ForecastResult, options::FitOptions, spec::ModelSpec},
        errors::ModelError,
    },
    returns::{ReturnSeries, TrainSet},
    search::errors::{SearchError, SearchResult},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingOptions {
    pub holdout_size: usize,
    pub n_rolls: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingForecast {
    pub roll: usize,
    pub window_len: usize,
    /// Date of the last return in the estimation window.
    pub origin: Option<NaiveDate>,
    pub status: FitStatus,
    pub forecast: Option<ForecastResult>,
    /// Returns observed after the window, at most `horizon` of them.
    pub realized: Vec<f64>,
}

/// Refit `spec` on expanding windows and forecast from each.
///
/// # Errors
/// - `InvalidRolling` unless `1 ≤ holdout_size < n` and
///   `1 ≤ n_rolls ≤ holdout_size`.
/// - `Model(InvalidHorizon)` for `horizon == 0`.
///
/// Fit failures in individual rolls are recorded, not raised.
pub fn rolling_forecast(
    spec: &ModelSpec, returns: &ReturnSeries, holdout_size: usize, horizon: usize, n_rolls: usize,
    fit_opts: &FitOptions,
) -> SearchResult<Vec<RollingForecast>> {
    let n = returns.len();
    if holdout_size == 0 || holdout_size >= n {
        return Err(SearchError::InvalidRolling {
            reason: format!("holdout_size must be in 1..{n}, got {holdout_size}"),
        });
    }
    if n_rolls == 0 || n_rolls > holdout_size {
        return Err(SearchError::InvalidRolling {
            reason: format!("n_rolls must be in 1..={holdout_size}, got {n_rolls}"),
        });
    }
    if horizon == 0 {
        return Err(ModelError::InvalidHorizon { horizon }.into());
    }

    let mut out = Vec::with_capacity(n_rolls);
    for roll in 0..n_rolls {
        let window_len = n - holdout_size + roll;
        let train = TrainSet(returns.slice(0, window_len));
        let fitted = fit(&train, spec, fit_opts);
        let forecast = match fitted.forecast(horizon) {
            Ok(fc) => Some(fc),
            Err(err) => {
                warn!(model = %fitted.label, roll, error = %err, "rolling forecast skipped");
                None
            }
        };
        let realized = returns.values()[window_len..(window_len + horizon).min(n)].to_vec();
        debug!(model = %fitted.label, roll, window_len, "rolling fit done");
        out.push(RollingForecast {
            roll,
            window_len,
            origin: returns.dates().get(window_len - 1).copied(),
            status: fitted.status,
            forecast,
            realized,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> ReturnSeries {
        ReturnSeries::from_values((0..n).map(|i| ((i * 37 % 11) as f64 - 5.0) * 0.002).collect())
    }

    #[test]
    // Purpose
    // -------
    // Argument validation follows the documented ranges.
    //
    // Given
    // -----
    // - 50 returns.
    //
    // Expect
    // ------
    // - holdout 0 or 50, n_rolls 0 or > holdout → InvalidRolling;
    //   horizon 0 → Model(InvalidHorizon).
    fn invalid_arguments_are_rejected() {
        let s = series(50);
        let spec = ModelSpec::arma(0, 0);
        let opts = FitOptions::default();
        for (holdout, rolls) in [(0, 1), (50, 1), (10, 0), (10, 11)] {
            assert!(matches!(
                rolling_forecast(&spec, &s, holdout, 5, rolls, &opts),
                Err(SearchError::InvalidRolling { .. })
            ));
        }
        assert_eq!(
            rolling_forecast(&spec, &s, 10, 0, 1, &opts),
            Err(SearchError::Model(ModelError::InvalidHorizon { horizon: 0 }))
        );
    }

    #[test]
    // Purpose
    // -------
    // Windows expand by one per roll and realised values are truncated at the
    // end of the sample.
    //
    // Given
    // -----
    // - 25 returns, holdout 3, 3 rolls, horizon 5 (windows too short to fit).
    //
    // Expect
    // ------
    // - Window lengths 22, 23, 24; realised lengths 3, 2, 1; failed status,
    //   no forecast.
    fn windows_expand_and_realized_is_truncated() {
        let s = series(25);
        let rolls =
            rolling_forecast(&ModelSpec::arma(3, 3), &s, 3, 5, 3, &FitOptions::default()).unwrap();
        let windows: Vec<usize> = rolls.iter().map(|r| r.window_len).collect();
        let realized: Vec<usize> = rolls.iter().map(|r| r.realized.len()).collect();
        assert_eq!(windows, [22, 23, 24]);
        assert_eq!(realized, [3, 2, 1]);
        assert!(rolls.iter().all(|r| r.forecast.is_none()));
        assert!(matches!(rolls[0].status, FitStatus::Failed { .. }));
        assert_eq!(rolls[0].realized[0], s.values()[22]);
    }
}
