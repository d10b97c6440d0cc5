//! Bootstrap forecast distributions for a fitted model.
//!
//! `Partial` mode keeps the estimate fixed and resamples standardized
//! residuals into future shocks. `Full` mode first simulates `n_bootfit`
//! synthetic training samples from the fit, re-estimates the model on each
//! (in parallel), and spreads the paths round-robin over the re-estimated
//! parameter sets. Each set continues from the state obtained by filtering
//! the original training data with that set, so every path starts from the
//! observed history.
//!
//! The RNG is a `StdRng` seeded from [`BootstrapOptions::seed`]; all draws
//! happen on the calling thread in a fixed order, so results are
//! reproducible regardless of how many refits run concurrently.
use crate::models::{
    arma_egarch::{FittedModel, fit_values},
    core::{
        options::{BootstrapMode, BootstrapOptions},
        params::ArmaEgarchParams,
        recursion::{InSampleState, filter},
        simulation::{BootstrapForecast, SimulatedPaths, quantile_bands, simulate_path, simulate_sample},
    },
    errors::{ModelError, ModelResult},
};
use ndarray::{ArrayView1, Axis};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Simulate `opts.n_paths` paths of length `horizon` and summarize them.
///
/// # Errors
/// - `InvalidHorizon` for `horizon == 0`.
/// - `InvalidBootstrapOptions` when `opts` fails validation.
/// - `ModelNotConverged` when `model` holds no estimates.
pub fn bootstrap_forecast(
    model: &FittedModel, horizon: usize, opts: &BootstrapOptions,
) -> ModelResult<BootstrapForecast> {
    if horizon == 0 {
        return Err(ModelError::InvalidHorizon { horizon });
    }
    opts.validate()?;
    let (params, state) = model.estimates()?;
    let mut rng = StdRng::seed_from_u64(opts.seed);

    let sets = match opts.mode {
        BootstrapMode::Partial => vec![(params.clone(), state.clone())],
        BootstrapMode::Full => refit_parameter_sets(model, params, state, opts, &mut rng)?,
    };

    let guards = &model.fit_options.guards;
    let mut paths = SimulatedPaths::zeros(opts.n_paths, horizon);
    for i in 0..opts.n_paths {
        let (p, s) = &sets[i % sets.len()];
        let (returns, sigma) = simulate_path(p, s, horizon, &model.std_residuals, guards, &mut rng)?;
        paths.returns.row_mut(i).assign(&ArrayView1::from(&returns));
        paths.sigma.row_mut(i).assign(&ArrayView1::from(&sigma));
    }

    let sigma_mean = paths
        .sigma
        .mean_axis(Axis(0))
        .map(|m| m.to_vec())
        .unwrap_or_default();
    debug!(
        model = %model.label,
        n_paths = opts.n_paths,
        n_param_sets = sets.len(),
        horizon,
        "bootstrap paths simulated"
    );
    Ok(BootstrapForecast {
        mode: opts.mode,
        n_paths: paths.n_paths(),
        n_param_sets: sets.len(),
        quantiles: opts.quantiles.clone(),
        series: quantile_bands(&paths.returns, &opts.quantiles),
        sigma: quantile_bands(&paths.sigma, &opts.quantiles),
        sigma_mean,
    })
}

fn refit_parameter_sets(
    model: &FittedModel, params: &ArmaEgarchParams, state: &InSampleState, opts: &BootstrapOptions,
    rng: &mut StdRng,
) -> ModelResult<Vec<(ArmaEgarchParams, InSampleState)>> {
    let data = model.data.as_ref().ok_or_else(|| ModelError::ModelNotConverged {
        label: model.label.clone(),
        reason: "training data not retained".to_string(),
    })?;
    let guards = &model.fit_options.guards;

    let samples = (0..opts.n_bootfit)
        .map(|_| simulate_sample(params, data.len(), data.log_var0, &model.std_residuals, guards, rng))
        .collect::<ModelResult<Vec<_>>>()?;

    let refits: Vec<Option<ArmaEgarchParams>> = samples
        .par_iter()
        .map(|sample| {
            let refit = fit_values(sample, &model.spec, &model.fit_options);
            if refit.converged() { refit.params } else { None }
        })
        .collect();

    let mut n_fallback = 0usize;
    let sets = refits
        .into_iter()
        .map(|refit| {
            let continued = refit.and_then(|p| {
                let out = filter(&p, data, guards).ok()?;
                Some((p, out.state))
            });
            continued.unwrap_or_else(|| {
                n_fallback += 1;
                (params.clone(), state.clone())
            })
        })
        .collect();

    if n_fallback > 0 {
        warn!(
            model = %model.label,
            failed = n_fallback,
            total = opts.n_bootfit,
            "bootstrap refits fell back to the original estimate"
        );
    }
    Ok(sets)
}
