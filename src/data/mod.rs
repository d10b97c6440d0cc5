//! data — acquisition and validation of daily price history.
//!
//! Purpose
//! -------
//! First pipeline stage. A [`MarketDataProvider`] returns a validated
//! [`PriceSeries`] or a [`DataError`]; nothing downstream re-checks the
//! price invariants.
//!
//! Conventions
//! -----------
//! - Dates are `chrono::NaiveDate` (exchange-local trading days).
//! - Date ranges are inclusive on both ends.

pub mod errors;
pub mod provider;
pub mod series;

pub use self::errors::{DataError, DataResult};
pub use self::provider::{CsvProvider, InMemoryProvider, MarketDataProvider};
pub use self::series::{PriceBar, PriceField, PriceSeries};

pub mod prelude {
    pub use super::errors::{DataError, DataResult};
    pub use super::provider::{CsvProvider, InMemoryProvider, MarketDataProvider};
    pub use super::series::{PriceBar, PriceField, PriceSeries};
}
