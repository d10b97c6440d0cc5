//! High-level entry point: maximize a [`LogLikelihood`] with L-BFGS.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome},
        types::Theta,
    },
};
use tracing::warn;

/// Maximize `ℓ(θ)` starting from `theta0` (consumed).
///
/// Validates the start with `f.check`, wraps `(f, data)` in an
/// [`ArgMinAdapter`], builds the solver selected by `opts.line_searcher` and
/// runs it.
///
/// # Errors
/// Errors from `f.check`, solver construction, or the run itself. A run that
/// merely exhausts its iteration budget is *not* an error; it comes back with
/// `converged == false`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use volatility_report::optimization::errors::OptResult;
/// use volatility_report::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions, Theta,
/// };
///
/// struct Concave;
/// impl LogLikelihood for Concave {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Concave, array![0.1, -0.2], &(), &MLEOptions::default())?;
/// assert!(out.value <= 0.0);
/// # Ok::<(), volatility_report::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

/// [`maximize`], restarted once with the other line search when the first
/// run fails.
///
/// The restart happens when the first run returns an error (from `theta0`)
/// or when the solver exits on its own without converging (from the θ̂ it
/// reached). A run that merely exhausts its iteration budget is returned as
/// is. The flag is `true` when the returned outcome came from the restart.
///
/// # Errors
/// Errors from `f.check`, or the restart's error when both runs fail.
pub fn maximize_with_fallback<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<(OptimOutcome, bool)> {
    f.check(&theta0, data)?;
    let first = maximize(f, theta0.clone(), data, opts);
    let restart_from = match &first {
        Ok(out) if out.converged || !out.solver_exit => None,
        Ok(out) => Some(out.theta_hat.clone()),
        Err(_) => Some(theta0),
    };
    let Some(restart_from) = restart_from else {
        return first.map(|out| (out, false));
    };

    let alt = MLEOptions { line_searcher: opts.line_searcher.alternate(), ..opts.clone() };
    match &first {
        Ok(out) => warn!(
            status = %out.status,
            iterations = out.iterations,
            retry = ?alt.line_searcher,
            "solver exited early; restarting with the other line search"
        ),
        Err(err) => warn!(
            error = %err,
            retry = ?alt.line_searcher,
            "solver failed; restarting with the other line search"
        ),
    }
    let second = maximize(f, restart_from, data, &alt);

    match (first, second) {
        (_, Ok(out)) if out.converged => Ok((out, true)),
        (Ok(first), Ok(second)) if first.value > second.value => Ok((first, false)),
        (_, Ok(second)) => Ok((second, true)),
        (Ok(first), Err(_)) => Ok((first, false)),
        (Err(_), Err(second)) => Err(second),
    }
}
