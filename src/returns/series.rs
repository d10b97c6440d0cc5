//! Dated log returns.
use crate::{
    data::{PriceField, PriceSeries},
    returns::errors::{ReturnError, ReturnResult},
};
use chrono::NaiveDate;
use serde::Serialize;

/// `(date, log_return)` pairs in date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Build from parallel vectors. Callers inside the crate guarantee equal
    /// lengths; this is checked with a debug assertion only.
    pub(crate) fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Undated returns, e.g. simulated paths. Dates count days from 1970-01-01.
    pub fn from_values(values: Vec<f64>) -> Self {
        let dates = (0..values.len())
            .map(|i| NaiveDate::default() + chrono::Days::new(i as u64))
            .collect();
        Self { dates, values }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rows `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> ReturnSeries {
        Self::from_parts(self.dates[start..end].to_vec(), self.values[start..end].to_vec())
    }

    /// Squared returns, a proxy for realised variance.
    pub fn squared(&self) -> Vec<f64> {
        self.values.iter().map(|r| r * r).collect()
    }
}

/// Log returns of `field`.
///
/// # Errors
/// `InsufficientData` when the series has fewer than two rows.
pub fn to_log_returns(prices: &PriceSeries, field: PriceField) -> ReturnResult<ReturnSeries> {
    if prices.len() < 2 {
        return Err(ReturnError::InsufficientData { needed: 2, found: prices.len() });
    }
    let bars = prices.bars();
    let (dates, values) = bars
        .windows(2)
        .map(|w| (w[1].date, field.extract(&w[1]).ln() - field.extract(&w[0]).ln()))
        .unzip();
    Ok(ReturnSeries::from_parts(dates, values))
}
