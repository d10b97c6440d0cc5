//! search — grid estimation, model selection, and rolling refits.
//!
//! Purpose
//! -------
//! Fit a fixed list of ARMA-eGARCH candidates on the training returns, rank
//! them by an information criterion, and optionally evaluate a chosen
//! specification out of sample with expanding-window refits.
//!
//! Key behaviors
//! -------------
//! - [`fit_grid`] returns one fitted model per grid entry in grid order,
//!   sequentially or on the rayon pool.
//! - [`select`] picks the converged model with the smallest score; ties go
//!   to the earliest grid entry.
//! - [`rolling_forecast`] refits per roll and pairs each forecast with the
//!   realised returns.
pub mod errors;
pub mod grid;
pub mod rolling;
pub mod selection;

pub use self::errors::{SearchError, SearchResult};
pub use self::grid::{SearchOptions, fit_grid};
pub use self::rolling::{RollingForecast, RollingOptions, rolling_forecast};
pub use self::selection::select;

pub mod prelude {
    pub use super::errors::{SearchError, SearchResult};
    pub use super::grid::{SearchOptions, fit_grid};
    pub use super::rolling::{RollingForecast, RollingOptions, rolling_forecast};
    pub use super::selection::select;
}
