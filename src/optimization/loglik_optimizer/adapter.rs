//! Adapter exposing a [`LogLikelihood`] as an argmin problem.
//!
//! The cost is `c(θ) = -ℓ(θ)`. Analytic gradients are negated; without one,
//! the **cost** is finite-differenced directly so no sign flip is needed.
//! A non-finite `ℓ(θ)` costs [`NON_FINITE_COST`], so a line search stepping
//! into a region where the likelihood degenerates backs off instead of
//! aborting the run.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Cost reported in place of a non-finite `-ℓ(θ)`.
pub const NON_FINITE_COST: f64 = 1e30;

/// Borrowing bridge between a model, its data and argmin.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Ok(NON_FINITE_COST);
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Gradient of the cost at `θ`.
    ///
    /// Without an analytic gradient: central differences first; if any cost
    /// evaluation failed or the result is non-finite, retry once with forward
    /// differences and surface the captured error if that also fails.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                // The FD closure must return f64, so the first failure is
                // parked here and NaN is returned in its place.
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let central = theta.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
                    return Ok(central);
                }
                closure_err.replace(None);
                let forward = theta.forward_diff(&cost_func);
                if let Some(err) = closure_err.take() {
                    return Err(err);
                }
                validate_grad(&forward, dim)?;
                Ok(forward)
            }
            Err(e) => Err(e.into()),
        }
    }
}
