//! statistical_tests — exploratory diagnostics for prices and returns.
//!
//! Purpose
//! -------
//! Implement the classical checks run before volatility modeling:
//! Augmented Dickey–Fuller for unit roots, sample ACF/PACF, Jarque–Bera for
//! normality and Ljung–Box for serial correlation. [`Diagnostics`] bundles
//! them for the pipeline.
//!
//! Key behaviors
//! -------------
//! - Every test validates its input (length, finiteness, lag range) and
//!   returns [`StatResult`] instead of panicking.
//! - p-values come from `statrs` distributions; ADF uses MacKinnon's
//!   response surface with a standard normal link.
//!
//! Conventions
//! -----------
//! - Inputs are plain `&[f64]` slices in time order.
//! - Autocorrelations use the biased (1/n) denominator throughout, so ACF,
//!   PACF and Ljung–Box agree with each other.
//!
//! Downstream usage
//! ----------------
//! - The pipeline runs [`Diagnostics::run`] on prices and training returns.
//! - The model layer reuses [`ljung_box`] on standardized residuals.

pub mod adf;
pub mod autocorrelation;
pub mod diagnostics;
pub mod errors;
pub mod jarque_bera;
pub mod ljung_box;
pub mod outcome;
pub mod validation;

pub use self::adf::{AdfOptions, AdfOutcome, AdfRegression, adf_test, is_stationary};
pub use self::autocorrelation::{AcfEntry, acf, autocorrelation_profile, pacf_from_acf};
pub use self::diagnostics::{Diagnostics, DiagnosticsOptions};
pub use self::errors::{StatError, StatResult};
pub use self::jarque_bera::jarque_bera;
pub use self::ljung_box::ljung_box;
pub use self::outcome::TestOutcome;

pub mod prelude {
    pub use super::adf::{AdfOptions, AdfOutcome, AdfRegression, adf_test};
    pub use super::autocorrelation::{AcfEntry, autocorrelation_profile};
    pub use super::diagnostics::{Diagnostics, DiagnosticsOptions};
    pub use super::errors::{StatError, StatResult};
    pub use super::jarque_bera::jarque_bera;
    pub use super::ljung_box::ljung_box;
    pub use super::outcome::TestOutcome;
}
