//! core — shared ARMA-eGARCH data, parameters, recursions, and simulation.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks of the ARMA(p, q)-eGARCH(1,1)-t
//! model: specifications, the θ ↔ parameter maps, the in-sample filter,
//! analytic forecasts, and residual-bootstrap simulation. The fitted-model
//! API in [`crate::models`] builds on these.
//!
//! Key behaviors
//! -------------
//! - [`ModelSpec`] and [`MODEL_GRID`] describe the candidates.
//! - [`ArmaEgarchParams`] maps unconstrained `θ` to stationary, invertible
//!   parameters with `|β| < 1` and `ν > 2`.
//! - [`filter`] runs the mean/variance recursion and the Student-t
//!   log-likelihood; [`forecast_recursion`] and [`simulate_path`] continue it
//!   out of sample.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; lag histories are stored oldest first.
//! - No I/O or logging happens here; errors surface as `ModelResult`.
pub mod data;
pub mod forecasts;
pub mod guards;
pub mod innovations;
pub mod options;
pub mod params;
pub mod recursion;
pub mod simulation;
pub mod spec;

pub use self::data::ReturnData;
pub use self::forecasts::{ForecastResult, ForecastStep, forecast_recursion};
pub use self::guards::LogVarianceGuards;
pub use self::innovations::{StandardizedStudentT, expected_abs_z};
pub use self::options::{BootstrapMode, BootstrapOptions, FitOptions};
pub use self::params::{ArmaEgarchParams, coefficient_names, initial_theta};
pub use self::recursion::{FilterOutput, InSampleState, filter};
pub use self::simulation::{
    BootstrapForecast, QuantileBand, SimulatedPaths, quantile_bands, quantile_type7, simulate_path,
    simulate_sample,
};
pub use self::spec::{Distribution, MODEL_GRID, ModelSpec, VarianceModel};
