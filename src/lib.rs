//! volatility_report — ARMA-eGARCH volatility analysis for daily prices.
//!
//! Purpose
//! -------
//! Turn a daily price history into a volatility report: log returns,
//! stationarity / autocorrelation / normality diagnostics, a grid search over
//! ARMA(p, q)-eGARCH(1,1) models with Student-t innovations, information
//! criterion selection, and multi-step mean / volatility forecasts with
//! optional bootstrap bands.
//!
//! Key behaviors
//! -------------
//! - [`data`]: the [`data::MarketDataProvider`] seam with CSV and in-memory
//!   providers, and validated [`data::PriceSeries`].
//! - [`returns`]: log returns and the chronological train/test split.
//! - [`statistical_tests`]: ADF, ACF/PACF, Jarque–Bera, Ljung–Box.
//! - [`optimization`]: a generic L-BFGS log-likelihood maximizer on `argmin`
//!   plus the numerically stable parameter transforms.
//! - [`inference`]: standard errors from the observed information.
//! - [`models`]: the ARMA-eGARCH-t likelihood, fitting, forecasting and
//!   bootstrap.
//! - [`search`]: grid fitting, selection, rolling refits.
//! - [`pipeline`]: the end-to-end [`pipeline::Pipeline::run`].
//!
//! Conventions
//! -----------
//! - Indexing is 0-based and series are stored oldest first.
//! - Each module owns a hand-written error enum and `Result` alias; the
//!   pipeline wraps them all in [`pipeline::PipelineError`].
//! - Logging goes through `tracing`; the library never installs a
//!   subscriber.

pub mod data;
pub mod inference;
pub mod models;
pub mod optimization;
pub mod pipeline;
pub mod returns;
pub mod search;
pub mod statistical_tests;

pub mod prelude {
    pub use crate::data::prelude::*;
    pub use crate::models::prelude::*;
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineError, Report, RunParams};
    pub use crate::returns::prelude::*;
    pub use crate::search::prelude::*;
}
