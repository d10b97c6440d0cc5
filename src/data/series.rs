//! data::series — validated daily price history.
//!
//! Purpose
//! -------
//! Hold one instrument's ordered daily bars behind a constructor that
//! enforces the invariants every later stage relies on.
//!
//! Invariants
//! ----------
//! - At least one bar.
//! - Dates unique and strictly increasing.
//! - `open`, `high`, `low`, `close`, `adjusted_close` finite and `> 0`.
//! - `volume` finite and `>= 0`.
//! - Immutable after construction; accessors hand out slices only.
use crate::data::errors::{DataError, DataResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub adjusted_close: f64,
}

/// Which price column feeds the return transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceField {
    #[default]
    Close,
    AdjustedClose,
}

impl PriceField {
    pub fn extract(self, bar: &PriceBar) -> f64 {
        match self {
            PriceField::Close => bar.close,
            PriceField::AdjustedClose => bar.adjusted_close,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and wrap `bars`.
    ///
    /// # Errors
    /// `EmptySeries`, `NonIncreasingDates`, `InvalidPrice` or `InvalidVolume`
    /// for the first offending bar.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> DataResult<Self> {
        if bars.is_empty() {
            return Err(DataError::EmptySeries);
        }
        for (index, bar) in bars.iter().enumerate() {
            validate_bar(index, bar)?;
            if index > 0 && bars[index - 1].date >= bar.date {
                return Err(DataError::NonIncreasingDates {
                    index,
                    previous: bars[index - 1].date,
                    current: bar.date,
                });
            }
        }
        Ok(Self { symbol: symbol.into(), bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    /// Prices of `field`, in date order.
    pub fn values(&self, field: PriceField) -> Vec<f64> {
        self.bars.iter().map(|b| field.extract(b)).collect()
    }
}

fn validate_bar(index: usize, bar: &PriceBar) -> DataResult<()> {
    let prices = [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
        ("adjusted_close", bar.adjusted_close),
    ];
    for (field, value) in prices {
        if !value.is_finite() || value <= 0.0 {
            return Err(DataError::InvalidPrice { index, field, value });
        }
    }
    if !bar.volume.is_finite() || bar.volume < 0.0 {
        return Err(DataError::InvalidVolume { index, value: bar.volume });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000.0,
            adjusted_close: close * 0.5,
        }
    }

    #[test]
    // Purpose
    // -------
    // A well-formed series is accepted and exposes both price columns.
    //
    // Given
    // -----
    // - Three bars on consecutive days.
    //
    // Expect
    // ------
    // - `len() == 3`; `values(Close)` and `values(AdjustedClose)` differ.
    fn new_accepts_valid_bars() {
        let series = PriceSeries::new("ABC", vec![bar(2, 10.0), bar(3, 11.0), bar(4, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "ABC");
        assert_eq!(series.values(PriceField::Close), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.values(PriceField::AdjustedClose), vec![5.0, 5.5, 6.0]);
    }

    #[test]
    // Purpose
    // -------
    // Each invariant violation is reported with its own variant.
    //
    // Given
    // -----
    // - An empty vector, a duplicated date, a zero close and a negative volume.
    //
    // Expect
    // ------
    // - `EmptySeries`, `NonIncreasingDates`, `InvalidPrice`, `InvalidVolume`.
    fn new_rejects_each_invariant_violation() {
        assert_eq!(PriceSeries::new("A", vec![]), Err(DataError::EmptySeries));

        let dup = PriceSeries::new("A", vec![bar(2, 10.0), bar(2, 11.0)]);
        assert!(matches!(dup, Err(DataError::NonIncreasingDates { index: 1, .. })));

        let zero = PriceSeries::new("A", vec![bar(2, 10.0), bar(3, 0.0)]);
        assert!(matches!(zero, Err(DataError::InvalidPrice { index: 1, .. })));

        let mut neg = bar(2, 10.0);
        neg.volume = -1.0;
        assert!(matches!(PriceSeries::new("A", vec![neg]), Err(DataError::InvalidVolume { .. })));
    }
}
