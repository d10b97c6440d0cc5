//! Chronological train/test split.
use crate::returns::{
    errors::{ReturnError, ReturnResult},
    series::ReturnSeries,
};
use serde::Serialize;

/// Estimation window: the leading rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainSet(pub ReturnSeries);

/// Holdout: the trailing rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSet(pub ReturnSeries);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Split {
    pub train: TrainSet,
    pub test: TestSet,
}

impl TrainSet {
    pub fn returns(&self) -> &ReturnSeries {
        &self.0
    }
}

impl TestSet {
    pub fn returns(&self) -> &ReturnSeries {
        &self.0
    }
}

/// Cut `series` at `floor(ratio · n)`.
///
/// # Errors
/// - `InvalidSplitRatio` unless `0 < ratio < 1`.
/// - `InsufficientData` when either side would be empty.
pub fn split(series: &ReturnSeries, ratio: f64) -> ReturnResult<Split> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ReturnError::InvalidSplitRatio { ratio });
    }
    let n = series.len();
    let boundary = (ratio * n as f64).floor() as usize;
    if boundary == 0 || boundary == n {
        return Err(ReturnError::InsufficientData { needed: 2, found: n });
    }
    Ok(Split {
        train: TrainSet(series.slice(0, boundary)),
        test: TestSet(series.slice(boundary, n)),
    })
}
