//! returns — log-return transform and chronological train/test split.
//!
//! Purpose
//! -------
//! Second pipeline stage. Turns a validated [`PriceSeries`](crate::data::PriceSeries) into continuously
//! compounded returns and cuts them into an estimation window and a holdout.
//!
//! Key behaviors
//! -------------
//! - [`to_log_returns`]: `rₜ = ln pₜ − ln pₜ₋₁`, one value per bar after the
//!   first, dated by the later bar.
//! - [`split`]: first `floor(ratio · n)` returns for training, the rest for
//!   testing; concatenating the halves reproduces the input.
//!
//! Invariants
//! ----------
//! - Both functions are pure; inputs are never mutated.
//! - Prices are already finite and positive (enforced by `PriceSeries`), so
//!   every return is finite.

pub mod errors;
pub mod series;
pub mod split;

pub use self::errors::{ReturnError, ReturnResult};
pub use self::series::{ReturnSeries, to_log_returns};
pub use self::split::{Split, TestSet, TrainSet, split};

pub mod prelude {
    pub use super::errors::{ReturnError, ReturnResult};
    pub use super::series::{ReturnSeries, to_log_returns};
    pub use super::split::{Split, TestSet, TrainSet, split};
}
