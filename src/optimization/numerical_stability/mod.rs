//! numerical_stability — numerically robust transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Collect the scalar and vector transforms that map unconstrained optimizer
//! space into model-space parameters, together with the small tolerances the
//! optimizer, model and inference layers share.
//!
//! Key behaviors
//! -------------
//! - Stable scalar transforms (`safe_softplus`, its inverse, `bounded_tanh`)
//!   for strictly positive or bounded parameters.
//! - The partial-autocorrelation map (`pacf_to_coefficients`) that turns any
//!   real vector into the coefficients of a stationary polynomial, and its
//!   inverse for building starting values.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64` and `ndarray` views. No logging, no I/O.
//! - Domain validation (lengths, finiteness) is the caller's job.

pub mod transformations;

pub use self::transformations::{
    EIGEN_EPS, GENERAL_TOL, STATIONARITY_MARGIN, bounded_tanh, bounded_tanh_inv,
    coefficients_to_pacf, pacf_to_coefficients, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, GENERAL_TOL, STATIONARITY_MARGIN, bounded_tanh, pacf_to_coefficients,
        safe_softplus, safe_softplus_inv,
    };
}
