//! Pick the best fitted candidate.
use crate::{
    models::arma_egarch::FittedModel,
    search::errors::{SearchError, SearchResult},
};

/// Converged model with the smallest score.
///
/// Ties go to the earliest entry; NaN scores rank as `+∞`; models that did
/// not converge are never returned, whatever their score.
///
/// # Errors
/// `NoConvergedModel` when no converged model has a finite score.
pub fn select(models: &[FittedModel]) -> SearchResult<&FittedModel> {
    let mut best: Option<(&FittedModel, f64)> = None;
    for model in models.iter().filter(|m| m.converged()) {
        let score = if model.score.is_nan() { f64::INFINITY } else { model.score };
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, s)) if s <= score => {}
            _ => best = Some((model, score)),
        }
    }
    best.map(|(m, _)| m).ok_or(SearchError::NoConvergedModel { tried: models.len() })
}
