//! inference — coefficient uncertainty for fitted models.
//!
//! Purpose
//! -------
//! Provide classical and sandwich standard errors for maximum-likelihood
//! estimates, computed from a finite-difference observed information.
//!
//! Downstream usage
//! ----------------
//! - The ARMA-eGARCH fit calls [`calc_standard_errors`] and
//!   [`calc_robust_standard_errors`] on natural-space log-likelihood closures
//!   after a successful optimization.
//! - Failures here never invalidate a fit; callers fall back to `NaN` errors.

pub mod hessian;

pub use self::hessian::{calc_robust_standard_errors, calc_standard_errors};

pub mod prelude {
    pub use super::hessian::{calc_robust_standard_errors, calc_standard_errors};
}
