//! Fit every candidate of a grid on one training set.
use crate::{
    models::{
        arma_egarch::{FittedModel, fit},
        core::{options::FitOptions, spec::ModelSpec},
        criteria::InformationCriterion,
    },
    returns::TrainSet,
    search::errors::{SearchError, SearchResult},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub criterion: InformationCriterion,
    /// Fit candidates on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions { criterion: InformationCriterion::Akaike, parallel: false }
    }
}

/// One [`FittedModel`] per grid entry, in grid order, scored by
/// `search.criterion`.
///
/// # Errors
/// `EmptyGrid` when `grid` is empty. Individual fit failures are not errors.
pub fn fit_grid(
    train: &TrainSet, grid: &[ModelSpec], fit_opts: &FitOptions, search: &SearchOptions,
) -> SearchResult<Vec<FittedModel>> {
    if grid.is_empty() {
        return Err(SearchError::EmptyGrid);
    }
    let fit_one = |spec: &ModelSpec| {
        let mut model = fit(train, spec, fit_opts);
        model.rescore(search.criterion);
        model
    };
    let models: Vec<FittedModel> = if search.parallel {
        grid.par_iter().map(fit_one).collect()
    } else {
        grid.iter().map(fit_one).collect()
    };

    let n_converged = models.iter().filter(|m| m.converged()).count();
    info!(
        candidates = models.len(),
        converged = n_converged,
        criterion = search.criterion.name(),
        "grid search finished"
    );
    Ok(models)
}
