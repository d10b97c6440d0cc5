//! models — ARMA-eGARCH-t volatility models: estimation, scoring, forecasts.
//!
//! Purpose
//! -------
//! Provide the model layer of the crate: the core recursion and parameter
//! maps in [`core`], fitting and analytic forecasting in [`arma_egarch`],
//! information criteria in [`criteria`], and bootstrap forecast bands in
//! [`bootstrap`].
//!
//! Key behaviors
//! -------------
//! - [`fit`] maximizes the Student-t log-likelihood of one [`ModelSpec`]
//!   with the generic optimizer and returns a [`FittedModel`]; failures are
//!   recorded in [`FitStatus`] rather than raised.
//! - [`forecast`] and [`bootstrap_forecast`] continue a converged fit past
//!   the end of the training sample.
//!
//! Conventions
//! -----------
//! - Optimizer-space vectors are `θ`; reported coefficients are in natural
//!   parameter space.
//! - This layer logs per fit through `tracing` and never installs a
//!   subscriber.
pub mod arma_egarch;
pub mod bootstrap;
pub mod core;
pub mod criteria;
pub mod errors;

pub use self::arma_egarch::{
    ArmaEgarchModel, Coefficient, FitStatus, FittedModel, OptimizerSummary, ResidualTests, fit,
    fit_values, forecast,
};
pub use self::bootstrap::bootstrap_forecast;
pub use self::core::{
    ArmaEgarchParams, BootstrapForecast, BootstrapMode, BootstrapOptions, FitOptions,
    ForecastResult, ForecastStep, InSampleState, LogVarianceGuards, MODEL_GRID, ModelSpec,
    QuantileBand, ReturnData,
};
pub use self::criteria::{InformationCriteria, InformationCriterion};
pub use self::errors::{ModelError, ModelResult};

pub mod prelude {
    pub use super::arma_egarch::{FitStatus, FittedModel, fit, forecast};
    pub use super::bootstrap::bootstrap_forecast;
    pub use super::core::{
        ArmaEgarchParams, BootstrapMode, BootstrapOptions, FitOptions, ForecastResult,
        LogVarianceGuards, MODEL_GRID, ModelSpec,
    };
    pub use super::criteria::InformationCriterion;
    pub use super::errors::{ModelError, ModelResult};
}
