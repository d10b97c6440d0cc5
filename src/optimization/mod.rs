//! optimization — generic MLE layer used by every model in the crate.
//!
//! Purpose
//! -------
//! Maximize user log-likelihoods `ℓ(θ)` with an `argmin` L-BFGS solver, and
//! provide the numerically stable transforms that models use to keep their
//! parameters inside admissible regions while the optimizer works in an
//! unconstrained space.
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`]: the [`LogLikelihood`](loglik_optimizer::LogLikelihood)
//!   trait, [`maximize`](loglik_optimizer::maximize), options, outcomes and
//!   finite-difference helpers.
//! - [`numerical_stability`]: softplus / tanh guards, the PACF-based map
//!   that keeps ARMA polynomials stationary and invertible, and shared
//!   tolerances.
//! - [`errors`]: the single [`OptError`](errors::OptError) surface.
//!
//! Conventions
//! -----------
//! - Solvers minimize `c(θ) = -ℓ(θ)`; all user-facing values are expressed
//!   in terms of `ℓ`.
//! - Model code never names `argmin` types; it goes through this module.
//! - Nothing here logs or performs I/O except the optional `obs_slog`
//!   observer in [`loglik_optimizer::run`].

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
