//! ARMA(p, q)-eGARCH(1,1)-t — estimation, scoring, and forecasting.
//!
//! Purpose
//! -------
//! Wrap the core recursion as a [`LogLikelihood`] so the generic L-BFGS
//! driver can maximize it, and turn the optimizer outcome into a
//! [`FittedModel`]: parameters, coefficient table with standard errors,
//! information criteria, standardized residuals with Ljung–Box checks, and
//! the end-of-sample state needed to forecast.
//!
//! Key behaviors
//! -------------
//! - [`fit`] never fails: specification, data, and optimizer problems all end
//!   in a [`FittedModel`] with [`FitStatus::Failed`] and `score = +∞`.
//! - Only `SolverConverged` / `TargetCostReached` count as convergence; an
//!   exhausted iteration budget is a failure.
//! - An optimizer error, or a solver that exits early (typically a failed
//!   line search), triggers one restart with the other line search.
//! - The optimizer sees the *mean* log-likelihood per observation with `μ`
//!   measured in sample standard deviations, so its tolerances do not depend
//!   on the sample length or the return scale. Reported log-likelihoods and
//!   criteria use the summed value.
//! - Standard errors are computed in natural parameter space; when the
//!   Hessian cannot be formed they are reported as NaN and the fit stands.
//!
//! Conventions
//! -----------
//! - `score` holds the criterion currently used for selection
//!   (Akaike unless [`FittedModel::rescore`] changed it).
use crate::{
    inference::{calc_robust_standard_errors, calc_standard_errors},
    models::{
        core::{
            data::ReturnData,
            forecasts::{ForecastResult, forecast_recursion},
            guards::LogVarianceGuards,
            options::FitOptions,
            params::{ArmaEgarchParams, coefficient_names, initial_theta},
            recursion::{FilterOutput, InSampleState, filter},
            spec::ModelSpec,
        },
        criteria::{InformationCriteria, InformationCriterion},
        errors::{ModelError, ModelResult},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, OptimOutcome, Theta, maximize_with_fallback},
    },
    returns::TrainSet,
    statistical_tests::{TestOutcome, ljung_box},
};
use ndarray::Array1;
use serde::Serialize;
use tracing::{debug, warn};

/// Lags used by the residual Ljung–Box checks.
pub const RESIDUAL_LB_LAGS: usize = 10;

/// Log-likelihood of one specification, evaluated in θ-space.
///
/// The optimizer's θ stores `μ / mean_scale` in place of `μ`; every other
/// entry follows [`ArmaEgarchParams::from_theta`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArmaEgarchModel {
    pub spec: ModelSpec,
    pub guards: LogVarianceGuards,
    pub mean_scale: f64,
}

impl ArmaEgarchModel {
    pub fn new(spec: ModelSpec, guards: LogVarianceGuards) -> Self {
        ArmaEgarchModel { spec, guards, mean_scale: 1.0 }
    }

    /// Model whose mean is measured in sample standard deviations of `data`.
    pub fn for_data(spec: ModelSpec, guards: LogVarianceGuards, data: &ReturnData) -> Self {
        ArmaEgarchModel { spec, guards, mean_scale: (0.5 * data.log_var0).exp() }
    }

    pub fn params(&self, theta: &Theta) -> ModelResult<ArmaEgarchParams> {
        if self.spec.include_mean && !theta.is_empty() {
            let mut unscaled = theta.clone();
            unscaled[0] *= self.mean_scale;
            return ArmaEgarchParams::from_theta(unscaled.view(), &self.spec);
        }
        ArmaEgarchParams::from_theta(theta.view(), &self.spec)
    }

    /// Optimizer coordinates of `params`.
    pub fn theta(&self, params: &ArmaEgarchParams) -> Theta {
        let mut theta = params.to_theta(&self.spec);
        if self.spec.include_mean {
            theta[0] /= self.mean_scale;
        }
        theta
    }

    pub fn filter_theta(&self, theta: &Theta, data: &ReturnData) -> ModelResult<FilterOutput> {
        filter(&self.params(theta)?, data, &self.guards)
    }
}

impl LogLikelihood for ArmaEgarchModel {
    type Data = ReturnData;

    /// Mean log-likelihood per observation.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        Ok(self.filter_theta(theta, data)?.loglik / data.len() as f64)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        self.spec.validate()?;
        let expected = self.spec.n_params();
        if theta.len() != expected {
            return Err(ModelError::InvalidThetaLength { expected, found: theta.len() }.into());
        }
        let needed = self.spec.min_observations();
        if data.len() < needed {
            return Err(ModelError::InsufficientData { needed, found: data.len() }.into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FitStatus {
    Converged,
    Failed { reason: String },
}

/// One row of the coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub robust_std_error: f64,
    pub t_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerSummary {
    pub status: String,
    pub iterations: usize,
    pub grad_norm: Option<f64>,
    /// `true` when the first line search failed or exited early and the
    /// other line search produced this outcome.
    pub used_fallback: bool,
}

/// Ljung–Box on `z` and on `z²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualTests {
    pub lags: usize,
    pub standardized: TestOutcome,
    pub squared: TestOutcome,
}

/// Outcome of fitting one [`ModelSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    pub spec: ModelSpec,
    pub label: String,
    pub status: FitStatus,
    pub n_obs: usize,
    pub params: Option<ArmaEgarchParams>,
    pub coefficients: Vec<Coefficient>,
    pub loglik: f64,
    pub criteria: Option<InformationCriteria>,
    /// Selection score; `+∞` for failed fits.
    pub score: f64,
    pub optimizer: Option<OptimizerSummary>,
    pub residual_tests: Option<ResidualTests>,
    pub state: Option<InSampleState>,
    pub std_residuals: Vec<f64>,
    /// In-sample conditional standard deviations.
    pub sigma: Vec<f64>,
    pub data: Option<ReturnData>,
    pub fit_options: FitOptions,
}

impl FittedModel {
    pub fn converged(&self) -> bool {
        matches!(self.status, FitStatus::Converged)
    }

    /// A failed fit carrying `reason`.
    pub fn failed(spec: &ModelSpec, n_obs: usize, fit_options: &FitOptions, reason: String) -> Self {
        FittedModel {
            spec: *spec,
            label: spec.label(),
            status: FitStatus::Failed { reason },
            n_obs,
            params: None,
            coefficients: Vec::new(),
            loglik: f64::NAN,
            criteria: None,
            score: f64::INFINITY,
            optimizer: None,
            residual_tests: None,
            state: None,
            std_residuals: Vec::new(),
            sigma: Vec::new(),
            data: None,
            fit_options: fit_options.clone(),
        }
    }

    /// Treat `params` as the estimate for `values` without optimizing.
    ///
    /// Standard errors are NaN. Useful for simulation studies and for
    /// forecasting from externally supplied parameters.
    pub fn from_params(
        spec: &ModelSpec, params: ArmaEgarchParams, values: &[f64], fit_options: &FitOptions,
    ) -> ModelResult<Self> {
        spec.validate()?;
        params.validate()?;
        let data = ReturnData::from_slice(values)?;
        let out = filter(&params, &data, &fit_options.guards)?;
        let names = coefficient_names(spec);
        let natural = params.to_natural(spec);
        let coefficients = coefficient_table(&names, &natural, None, None);
        Ok(assemble(spec, params, coefficients, out, data, fit_options, None))
    }

    /// Switch the selection score to `criterion`. Failed fits keep `+∞`.
    pub fn rescore(&mut self, criterion: InformationCriterion) {
        self.score = match (&self.status, &self.criteria) {
            (FitStatus::Converged, Some(ic)) => finite_or_inf(ic.get(criterion)),
            _ => f64::INFINITY,
        };
    }

    /// Parameters and end-of-sample state, or `ModelNotConverged`.
    pub fn estimates(&self) -> ModelResult<(&ArmaEgarchParams, &InSampleState)> {
        match (&self.status, &self.params, &self.state) {
            (FitStatus::Converged, Some(params), Some(state)) => Ok((params, state)),
            (FitStatus::Failed { reason }, _, _) => Err(ModelError::ModelNotConverged {
                label: self.label.clone(),
                reason: reason.clone(),
            }),
            _ => Err(ModelError::ModelNotConverged {
                label: self.label.clone(),
                reason: "no estimates stored".to_string(),
            }),
        }
    }

    pub fn forecast(&self, horizon: usize) -> ModelResult<ForecastResult> {
        forecast(self, horizon)
    }
}

/// Fit `spec` on the training returns.
pub fn fit(train: &TrainSet, spec: &ModelSpec, opts: &FitOptions) -> FittedModel {
    fit_values(train.returns().values(), spec, opts)
}

/// Fit `spec` on a plain slice of returns.
pub fn fit_values(values: &[f64], spec: &ModelSpec, opts: &FitOptions) -> FittedModel {
    let label = spec.label();
    match try_fit(values, spec, opts) {
        Ok(model) => {
            debug!(model = %label, loglik = model.loglik, score = model.score, "fit converged");
            model
        }
        Err(reason) => {
            warn!(model = %label, %reason, "fit failed");
            FittedModel::failed(spec, values.len(), opts, reason)
        }
    }
}

/// Analytic forecast from a converged fit.
///
/// # Errors
/// `InvalidHorizon` for `horizon == 0`; `ModelNotConverged` for failed fits.
pub fn forecast(model: &FittedModel, horizon: usize) -> ModelResult<ForecastResult> {
    if horizon == 0 {
        return Err(ModelError::InvalidHorizon { horizon });
    }
    let (params, state) = model.estimates()?;
    forecast_recursion(params, state, horizon, &model.fit_options.guards)
}

fn try_fit(values: &[f64], spec: &ModelSpec, opts: &FitOptions) -> Result<FittedModel, String> {
    spec.validate().map_err(|e| e.to_string())?;
    let needed = spec.min_observations();
    if values.len() < needed {
        return Err(ModelError::InsufficientData { needed, found: values.len() }.to_string());
    }
    let data = ReturnData::from_slice(values).map_err(|e| e.to_string())?;
    let model = ArmaEgarchModel::for_data(*spec, opts.guards, &data);
    let start = ArmaEgarchParams::from_theta(initial_theta(spec, &data).view(), spec)
        .map_err(|e| e.to_string())?;
    let theta0 = model.theta(&start);

    let (outcome, used_fallback) = maximize_with_fallback(&model, theta0, &data, &opts.mle_opts)
        .map_err(|e| format!("optimizer failed with both line searches: {e}"))?;
    if !outcome.converged {
        return Err(format!(
            "optimizer stopped without converging ({}) after {} iterations",
            outcome.status, outcome.iterations
        ));
    }

    let params = model.params(&outcome.theta_hat).map_err(|e| e.to_string())?;
    let out = filter(&params, &data, &opts.guards).map_err(|e| e.to_string())?;
    if !out.loglik.is_finite() {
        return Err(format!("non-finite log-likelihood {} at the optimum", out.loglik));
    }

    let names = coefficient_names(spec);
    let natural = params.to_natural(spec);
    let (se, robust) = standard_errors(spec, &natural, &data, &opts.guards);
    let coefficients = coefficient_table(&names, &natural, se.as_ref(), robust.as_ref());

    Ok(assemble(spec, params, coefficients, out, data, opts, Some(summary(&outcome, used_fallback))))
}

fn assemble(
    spec: &ModelSpec, params: ArmaEgarchParams, coefficients: Vec<Coefficient>, out: FilterOutput,
    data: ReturnData, opts: &FitOptions, optimizer: Option<OptimizerSummary>,
) -> FittedModel {
    let n_obs = data.len();
    let criteria = InformationCriteria::compute(out.loglik, spec.n_params(), n_obs);
    let residual_tests = residual_tests(&out.std_resid, spec);
    let sigma = out.sigma();
    FittedModel {
        spec: *spec,
        label: spec.label(),
        status: FitStatus::Converged,
        n_obs,
        params: Some(params),
        coefficients,
        loglik: out.loglik,
        score: finite_or_inf(criteria.akaike),
        criteria: Some(criteria),
        optimizer,
        residual_tests,
        state: Some(out.state),
        std_residuals: out.std_resid,
        sigma,
        data: Some(data),
        fit_options: opts.clone(),
    }
}

fn summary(outcome: &OptimOutcome, used_fallback: bool) -> OptimizerSummary {
    OptimizerSummary {
        status: outcome.status.clone(),
        iterations: outcome.iterations,
        grad_norm: outcome.grad_norm,
        used_fallback,
    }
}

/// Classical and sandwich errors of the natural parameters.
fn standard_errors(
    spec: &ModelSpec, natural: &Array1<f64>, data: &ReturnData, guards: &LogVarianceGuards,
) -> (Option<Array1<f64>>, Option<Array1<f64>>) {
    let eval = |x: &Theta| -> Option<FilterOutput> {
        let params = ArmaEgarchParams::from_natural(x.view(), spec).ok()?;
        filter(&params, data, guards).ok()
    };
    let loglik = |x: &Theta| eval(x).map_or(f64::NAN, |o| o.loglik);
    let contributions = |x: &Theta| {
        eval(x).map_or_else(|| Array1::from_elem(data.len(), f64::NAN), |o| Array1::from(o.loglik_terms))
    };

    let se = calc_standard_errors(&loglik, natural)
        .map_err(|e| warn!(model = %spec.label(), error = %e, "standard errors unavailable"))
        .ok();
    let robust = calc_robust_standard_errors(&loglik, &contributions, natural)
        .map_err(|e| warn!(model = %spec.label(), error = %e, "robust standard errors unavailable"))
        .ok();
    (se, robust)
}

fn coefficient_table(
    names: &[String], estimates: &Array1<f64>, se: Option<&Array1<f64>>,
    robust: Option<&Array1<f64>>,
) -> Vec<Coefficient> {
    names
        .iter()
        .zip(estimates.iter())
        .enumerate()
        .map(|(i, (name, &estimate))| {
            let std_error = se.map_or(f64::NAN, |s| s[i]);
            let robust_std_error = robust.map_or(f64::NAN, |s| s[i]);
            Coefficient {
                name: name.clone(),
                estimate,
                std_error,
                robust_std_error,
                t_value: if std_error > 0.0 { estimate / std_error } else { f64::NAN },
            }
        })
        .collect()
}

fn residual_tests(std_resid: &[f64], spec: &ModelSpec) -> Option<ResidualTests> {
    let lags = RESIDUAL_LB_LAGS.min(std_resid.len().saturating_sub(1));
    let fitdf = spec.ar_order + spec.ma_order;
    if lags <= fitdf {
        return None;
    }
    let squared: Vec<f64> = std_resid.iter().map(|z| z * z).collect();
    let standardized = ljung_box(std_resid, lags, fitdf).ok()?;
    let squared = ljung_box(&squared, lags, 0).ok()?;
    Some(ResidualTests { lags, standardized, squared })
}

fn finite_or_inf(x: f64) -> f64 {
    if x.is_nan() { f64::INFINITY } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::simulation::simulate_sample;
    use crate::models::core::innovations::StandardizedStudentT;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};
    use rand::{SeedableRng, rngs::StdRng};

    fn true_params() -> ArmaEgarchParams {
        ArmaEgarchParams {
            mu: 0.0004,
            ar: Array1::zeros(0),
            ma: Array1::zeros(0),
            omega: -0.35,
            alpha: -0.06,
            beta: 0.96,
            gamma: 0.14,
            shape: 7.0,
        }
    }

    fn simulated_returns(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let shocks = StandardizedStudentT::new(7.0).unwrap().sample_n(&mut rng, 5_000).unwrap();
        let lv0 = true_params().unconditional_log_var();
        simulate_sample(&true_params(), n, lv0, &shocks, &LogVarianceGuards::default(), &mut rng)
            .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A white-noise mean with eGARCH variance is recovered from simulated
    // data.
    //
    // Given
    // -----
    // - 1500 returns simulated with β = 0.96, ν = 7.
    //
    // Expect
    // ------
    // - Converged; β̂ within 0.1 of the truth; finite criteria and state;
    //   one coefficient row per parameter.
    fn fit_recovers_persistence_on_simulated_data() {
        let values = simulated_returns(1500, 17);
        let spec = ModelSpec::arma(0, 0);
        let fitted = fit_values(&values, &spec, &FitOptions::default());

        assert!(fitted.converged(), "status = {:?}", fitted.status);
        let params = fitted.params.as_ref().unwrap();
        assert!((params.beta - 0.96).abs() < 0.1, "beta = {}", params.beta);
        assert!(fitted.score.is_finite());
        assert_eq!(fitted.coefficients.len(), spec.n_params());
        assert_eq!(fitted.coefficients[0].name, "mu");
        assert_eq!(fitted.std_residuals.len(), 1500);
        assert!(fitted.state.is_some());
    }

    #[test]
    // Purpose
    // -------
    // Failures are values, not errors.
    //
    // Given
    // -----
    // - 10 returns (below the minimum sample) and a constant series.
    //
    // Expect
    // ------
    // - FitStatus::Failed with score +∞; forecast reports ModelNotConverged.
    fn failures_are_recorded_with_infinite_score() {
        let spec = ModelSpec::arma(1, 1);
        let short = fit_values(&[0.01; 10], &spec, &FitOptions::default());
        assert!(!short.converged());
        assert_eq!(short.score, f64::INFINITY);
        assert!(matches!(short.forecast(5), Err(ModelError::ModelNotConverged { .. })));

        let constant = fit_values(&[0.0; 100], &spec, &FitOptions::default());
        assert!(matches!(constant.status, FitStatus::Failed { .. }));
    }

    #[test]
    // Purpose
    // -------
    // A model built from known parameters forecasts 1..=h with positive σ.
    //
    // Given
    // -----
    // - `from_params` on 500 simulated returns, horizon 20.
    //
    // Expect
    // ------
    // - Steps numbered 1..=20, all σ > 0; horizon 0 rejected.
    fn from_params_forecasts_requested_horizon() {
        let values = simulated_returns(500, 5);
        let spec = ModelSpec::arma(0, 0);
        let model =
            FittedModel::from_params(&spec, true_params(), &values, &FitOptions::default()).unwrap();

        let fc = forecast(&model, 20).unwrap();
        let steps: Vec<usize> = fc.steps.iter().map(|s| s.step).collect();
        assert_eq!(steps, (1..=20).collect::<Vec<_>>());
        assert!(fc.steps.iter().all(|s| s.sigma > 0.0));
        assert_eq!(forecast(&model, 0), Err(ModelError::InvalidHorizon { horizon: 0 }));
    }

    #[test]
    // Purpose
    // -------
    // `rescore` moves the selection score to another criterion for converged
    // models and leaves failures at +∞.
    //
    // Given
    // -----
    // - A model from known parameters and a failed placeholder.
    //
    // Expect
    // ------
    // - Score equals the stored BIC; the failure's score stays +∞.
    fn rescore_switches_criterion_and_keeps_failures_infinite() {
        let values = simulated_returns(400, 9);
        let spec = ModelSpec::arma(0, 0);
        let mut model =
            FittedModel::from_params(&spec, true_params(), &values, &FitOptions::default()).unwrap();
        let bic = model.criteria.unwrap().bayes;
        model.rescore(InformationCriterion::Bayes);
        assert_eq!(model.score, bic);

        let mut failed = FittedModel::failed(&spec, 400, &FitOptions::default(), "x".into());
        failed.rescore(InformationCriterion::Bayes);
        assert_eq!(failed.score, f64::INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // `check` rejects a θ whose length does not match the specification.
    //
    // Given
    // -----
    // - ARMA(1,0) with a mean (9 parameters) and a θ of length 2.
    //
    // Expect
    // ------
    // - An error before any optimization.
    fn check_rejects_wrong_theta_length() {
        let model = ArmaEgarchModel::new(ModelSpec::arma(1, 0), LogVarianceGuards::default());
        let data = ReturnData::from_slice(&simulated_returns(100, 1)).unwrap();
        assert!(model.check(&array![0.0, 0.1], &data).is_err());
    }

    #[test]
    // Purpose
    // -------
    // The optimizer objective is the per-observation mean log-likelihood and
    // its μ coordinate is measured in sample standard deviations.
    //
    // Given
    // -----
    // - 600 simulated returns, ARMA(1,0) at the true eGARCH parameters with
    //   ar1 = 0.1, mapped to optimizer coordinates with `theta`.
    //
    // Expect
    // ------
    // - `params(theta(p)) == p`; θ[0] = μ / sd; value · n equals the summed
    //   filter log-likelihood.
    fn objective_is_mean_loglik_with_scaled_mean() {
        let values = simulated_returns(600, 3);
        let data = ReturnData::from_slice(&values).unwrap();
        let spec = ModelSpec::arma(1, 0);
        let model = ArmaEgarchModel::for_data(spec, LogVarianceGuards::default(), &data);
        let params = ArmaEgarchParams { ar: array![0.1], ..true_params() };

        let theta = model.theta(&params);
        let back = model.params(&theta).unwrap();
        assert_relative_eq!(back.mu, params.mu, epsilon = 1e-12);
        assert_relative_eq!(back.ar[0], 0.1, epsilon = 1e-10);
        assert_relative_eq!(theta[0], params.mu / (0.5 * data.log_var0).exp(), epsilon = 1e-12);

        let total = filter(&params, &data, &LogVarianceGuards::default()).unwrap().loglik;
        let mean = model.value(&theta, &data).unwrap();
        assert_relative_eq!(mean * 600.0, total, epsilon = 1e-8, max_relative = 1e-10);
    }
}
