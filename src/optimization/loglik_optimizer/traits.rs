//! loglik_optimizer::traits — the model-facing trait, options and outcome.
//!
//! Convention: callers *maximize* `ℓ(θ)`; internally the solver minimizes
//! `c(θ) = -ℓ(θ)`. An analytic gradient, when provided, is `∇ℓ(θ)` and the
//! adapter flips its sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Log-likelihood interface implemented by models.
///
/// - `value(θ, data)`: evaluate `ℓ(θ)`; invalid inputs are `Err`, not panics.
/// - `check(θ, data)`: called once before optimization to reject malformed
///   starting points or data.
/// - `grad(θ, data)`: optional `∇ℓ(θ)`. The default returns
///   [`OptError::GradientNotImplemented`], which makes the adapter fall back
///   to finite differences of the cost.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS. Parses case-insensitively from
/// `"MoreThuente"` / `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

impl LineSearcher {
    /// The other line search.
    pub fn alternate(self) -> Self {
        match self {
            LineSearcher::MoreThuente => LineSearcher::HagerZhang,
            LineSearcher::HagerZhang => LineSearcher::MoreThuente,
        }
    }
}

/// Optimizer configuration.
///
/// Default: `tol_grad = 1e-6`, `tol_cost = 1e-10`, `max_iter = 500`,
/// More–Thuente line search, default L-BFGS memory, not verbose.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-10), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. At least one must be set; tolerances must be finite and
/// positive, `max_iter` must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Normalized result of [`maximize`](super::maximize).
///
/// - `value` is the best log-likelihood `ℓ(θ̂)`, not the cost.
/// - `converged` is `true` only when the solver met one of its convergence
///   criteria; hitting the iteration budget, an interrupt or a timeout all
///   count as non-convergence.
/// - `solver_exit` marks a run the solver abandoned on its own, e.g. a line
///   search that found no acceptable step. Such runs are worth restarting
///   with the other line search; an exhausted budget is not.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub solver_exit: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// - `MissingThetaHat` / `InvalidThetaHat` when θ̂ is absent or non-finite.
    /// - `NonFiniteCost` when `value` is not finite.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, solver_exit, status) = match &termination {
            TerminationStatus::NotTerminated => (false, false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                let solver_exit = matches!(reason, TerminationReason::SolverExit(_));
                (converged, solver_exit, format!("{reason:?}"))
            }
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            solver_exit,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // `LineSearcher` parsing is case-insensitive and rejects unknown names.
    //
    // Given
    // -----
    // - "morethuente", "HAGERZHANG" and "bisection".
    //
    // Expect
    // ------
    // - The first two parse; the third yields `InvalidLineSearch`.
    fn line_searcher_from_str_is_case_insensitive() {
        assert_eq!("morethuente".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert_eq!("HAGERZHANG".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert!(matches!(
            "bisection".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` requires at least one rule and valid values.
    //
    // Given
    // -----
    // - All `None`; `max_iter = Some(0)`; a valid mix.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`, `InvalidMaxIter`, then `Ok`.
    fn tolerances_new_validates_inputs() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
        assert!(Tolerances::new(Some(1e-6), None, Some(100)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Zero L-BFGS memory is rejected by `MLEOptions::new`.
    //
    // Given
    // -----
    // - Valid tolerances and `lbfgs_mem = Some(0)`.
    //
    // Expect
    // ------
    // - `InvalidLBFGSMem`.
    fn mle_options_rejects_zero_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).unwrap();
        let result = MLEOptions::new(tols, LineSearcher::HagerZhang, false, Some(0));
        assert!(matches!(result, Err(OptError::InvalidLBFGSMem { mem: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Only genuine convergence reasons mark an outcome as converged.
    //
    // Given
    // -----
    // - The same θ̂ and value, once with `SolverConverged` and once with
    //   `MaxItersReached`.
    //
    // Expect
    // ------
    // - `converged == true` for the first, `false` for the second.
    fn optim_outcome_treats_max_iters_as_not_converged() {
        let done = OptimOutcome::new(
            Some(array![0.5]),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            Some(array![1e-8]),
        )
        .unwrap();
        assert!(done.converged);
        assert!(done.grad_norm.unwrap() < 1e-7);

        let budget = OptimOutcome::new(
            Some(array![0.5]),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            500,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(!budget.converged);
        assert!(!budget.solver_exit);
        assert_eq!(budget.status, "MaxItersReached");
    }

    #[test]
    // Purpose
    // -------
    // A solver that gives up on its own is flagged as a `solver_exit`, which
    // is what triggers the line-search fallback.
    //
    // Given
    // -----
    // - `SolverExit("Search direction must be a descent direction")`.
    //
    // Expect
    // ------
    // - `converged == false`, `solver_exit == true`, and the reason text is
    //   kept in `status`.
    fn optim_outcome_flags_solver_exit() {
        let exited = OptimOutcome::new(
            Some(array![0.5, 0.1]),
            -3.0,
            TerminationStatus::Terminated(TerminationReason::SolverExit(
                "Search direction must be a descent direction".to_string(),
            )),
            283,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(!exited.converged);
        assert!(exited.solver_exit);
        assert!(exited.status.contains("descent direction"));
    }

    #[test]
    // Purpose
    // -------
    // `alternate` swaps between the two line searches.
    //
    // Given
    // -----
    // - Each variant.
    //
    // Expect
    // ------
    // - The other variant; applying it twice is the identity.
    fn line_searcher_alternate_swaps() {
        assert_eq!(LineSearcher::MoreThuente.alternate(), LineSearcher::HagerZhang);
        assert_eq!(LineSearcher::HagerZhang.alternate(), LineSearcher::MoreThuente);
        assert_eq!(LineSearcher::HagerZhang.alternate().alternate(), LineSearcher::HagerZhang);
    }
}
