//! data::provider — sources of daily price history.
//!
//! Purpose
//! -------
//! Abstract "give me daily bars for a symbol over a date range" behind
//! [`MarketDataProvider`] so the pipeline never depends on a vendor.
//!
//! Key behaviors
//! -------------
//! - [`CsvProvider`] reads `<root>/<SYMBOL>.csv` in the usual daily-export
//!   layout (`Date,Open,High,Low,Close,Adj Close,Volume`). A missing
//!   `Adj Close` column falls back to `Close`; a missing `Volume` to 0.
//! - [`InMemoryProvider`] serves bars already held by the caller.
//! - Both filter to the inclusive `[start, end]` range and validate through
//!   [`PriceSeries::new`]. An unknown symbol, an empty range, or bars that
//!   fail validation are all `DataUnavailable`; the reason text names the
//!   validation failure.
use crate::data::{
    errors::{DataError, DataResult},
    series::{PriceBar, PriceSeries},
};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait MarketDataProvider {
    /// Daily bars for `symbol` over the inclusive range `[start, end]`.
    ///
    /// # Errors
    /// - `InvalidDateRange` when `start > end`.
    /// - `DataUnavailable` for everything that leaves no usable series:
    ///   unknown symbol or missing file, no bars in range, and bars with
    ///   non-increasing dates, invalid prices or invalid volumes.
    /// - `Csv` / `Io` when a file exists but cannot be parsed or read.
    fn fetch_daily(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> DataResult<PriceSeries>;
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "date")]
    date: NaiveDate,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
    #[serde(alias = "Adj Close", alias = "adjusted_close", alias = "adj_close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

impl From<CsvRow> for PriceBar {
    fn from(row: CsvRow) -> Self {
        PriceBar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            adjusted_close: row.adj_close.unwrap_or(row.close),
        }
    }
}

/// Directory of per-symbol CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    root: PathBuf,
}

impl CsvProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{symbol}.csv"))
    }

    fn read_bars(path: &Path) -> DataResult<Vec<PriceBar>> {
        let mut reader = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_path(path)?;
        let mut bars = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            bars.push(PriceBar::from(row?));
        }
        Ok(bars)
    }
}

impl MarketDataProvider for CsvProvider {
    fn fetch_daily(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> DataResult<PriceSeries> {
        check_range(start, end)?;
        let path = self.path_for(symbol);
        if !path.is_file() {
            return Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("no file at {}", path.display()),
            });
        }
        info!(symbol, path = %path.display(), "loading daily prices from CSV");
        let bars = Self::read_bars(&path)?;
        let total = bars.len();
        let series = filter_and_validate(symbol, bars, start, end)?;
        debug!(symbol, total, kept = series.len(), "filtered CSV rows to date range");
        Ok(series)
    }
}

/// Bars held in memory, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    bars: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) {
        self.bars.insert(symbol.into(), bars);
    }

    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.insert(symbol, bars);
        self
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn fetch_daily(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> DataResult<PriceSeries> {
        check_range(start, end)?;
        let bars = self.bars.get(symbol).ok_or_else(|| DataError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "unknown symbol".to_string(),
        })?;
        filter_and_validate(symbol, bars.clone(), start, end)
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> DataResult<()> {
    if start > end {
        return Err(DataError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn filter_and_validate(
    symbol: &str, bars: Vec<PriceBar>, start: NaiveDate, end: NaiveDate,
) -> DataResult<PriceSeries> {
    let in_range: Vec<PriceBar> =
        bars.into_iter().filter(|b| b.date >= start && b.date <= end).collect();
    if in_range.is_empty() {
        return Err(DataError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: format!("no bars between {start} and {end}"),
        });
    }
    PriceSeries::new(symbol, in_range).map_err(|err| DataError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: err.to_string(),
    })
}
