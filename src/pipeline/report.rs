//! The serialisable result of one pipeline run.
use crate::{
    models::{
        arma_egarch::{Coefficient, FitStatus, FittedModel, OptimizerSummary, ResidualTests},
        core::{forecasts::ForecastResult, params::ArmaEgarchParams, spec::ModelSpec},
        criteria::{InformationCriteria, InformationCriterion},
    },
    pipeline::errors::PipelineResult,
    search::RollingForecast,
    statistical_tests::Diagnostics,
};
use chrono::NaiveDate;
use serde::Serialize;

/// One row of the information-criterion table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub label: String,
    pub spec: ModelSpec,
    pub status: FitStatus,
    pub loglik: f64,
    pub criteria: Option<InformationCriteria>,
    pub score: f64,
}

impl From<&FittedModel> for CandidateSummary {
    fn from(m: &FittedModel) -> Self {
        CandidateSummary {
            label: m.label.clone(),
            spec: m.spec,
            status: m.status.clone(),
            loglik: m.loglik,
            criteria: m.criteria,
            score: m.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedModel {
    pub label: String,
    pub spec: ModelSpec,
    pub n_obs: usize,
    pub loglik: f64,
    pub criteria: Option<InformationCriteria>,
    pub params: Option<ArmaEgarchParams>,
    pub coefficients: Vec<Coefficient>,
    pub optimizer: Option<OptimizerSummary>,
    pub residual_tests: Option<ResidualTests>,
}

impl From<&FittedModel> for SelectedModel {
    fn from(m: &FittedModel) -> Self {
        SelectedModel {
            label: m.label.clone(),
            spec: m.spec,
            n_obs: m.n_obs,
            loglik: m.loglik,
            criteria: m.criteria,
            params: m.params.clone(),
            coefficients: m.coefficients.clone(),
            optimizer: m.optimizer.clone(),
            residual_tests: m.residual_tests,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub n_prices: usize,
    pub n_returns: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// `None` when the diagnostics could not be computed; the reason is in
    /// `diagnostics_error`.
    pub diagnostics: Option<Diagnostics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics_error: Option<String>,
    pub criterion: InformationCriterion,
    /// Every grid candidate, in grid order.
    pub candidates: Vec<CandidateSummary>,
    pub selected: SelectedModel,
    /// Analytic forecast, with bootstrap bands when requested.
    pub forecast: ForecastResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling: Option<Vec<RollingForecast>>,
}

impl Report {
    /// Pretty-printed JSON. Non-finite numbers render as `null`.
    pub fn to_json(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn candidate(&self, label: &str) -> Option<&CandidateSummary> {
        self.candidates.iter().find(|c| c.label == label)
    }
}
