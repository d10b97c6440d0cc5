//! loglik_optimizer — argmin-backed maximization of log-likelihoods.
//!
//! Purpose
//! -------
//! Let a model describe itself only through `ℓ(θ)` (and optionally `∇ℓ(θ)`)
//! and obtain a maximum-likelihood estimate, a convergence verdict and solver
//! diagnostics in return.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns a [`LogLikelihood`] into the cost
//!   `c(θ) = -ℓ(θ)` argmin minimizes, finite-differencing the cost when no
//!   analytic gradient exists.
//! - [`maximize`] validates `θ₀`, builds the L-BFGS solver chosen in
//!   [`MLEOptions`] ([`builders`]) and runs it ([`run::run_lbfgs`]).
//! - [`maximize_with_fallback`] restarts once with the other line search
//!   when the first run errors or the solver exits without converging.
//! - [`finite_diff`] computes validated, symmetrized Hessians for standard
//!   errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`LogLikelihood::value`] reports invalid inputs as [`OptError`]s, never
//!   panics.
//! - [`Tolerances`] and [`MLEOptions`] are validated on construction.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sign conventions in the adapter, solver construction,
//!   option validation and the outcome's convergence mapping; the model
//!   layer's tests exercise [`maximize`] on real likelihoods.
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::{maximize, maximize_with_fallback};
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::{maximize, maximize_with_fallback};
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
