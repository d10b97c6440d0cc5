//! Run configuration, deserialisable from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration: close
//! prices, an 80/20 split, Akaike selection over the full grid, and a
//! 20-step forecast without bootstrap or rolling evaluation.
use crate::{
    data::PriceField,
    models::{
        core::{guards::LogVarianceGuards, options::{BootstrapOptions, FitOptions}},
        errors::ModelError,
    },
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    pipeline::errors::{PipelineError, PipelineResult},
    returns::ReturnError,
    search::{RollingOptions, SearchOptions},
    statistical_tests::DiagnosticsOptions,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPLIT_RATIO: f64 = 0.8;
pub const DEFAULT_HORIZON: usize = 20;

/// Which symbol and date range to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RunParams {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        RunParams { symbol: symbol.into(), start, end }
    }
}

/// Serde-facing optimizer settings, turned into [`FitOptions`] by
/// [`OptimizerConfig::to_fit_options`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
    /// `"MoreThuente"` or `"HagerZhang"`, case insensitive.
    pub line_searcher: String,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
    pub log_var_min: f64,
    pub log_var_max: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        let fit = FitOptions::default();
        OptimizerConfig {
            tol_grad: fit.mle_opts.tols.tol_grad,
            tol_cost: fit.mle_opts.tols.tol_cost,
            max_iter: fit.mle_opts.tols.max_iter,
            line_searcher: "MoreThuente".to_string(),
            lbfgs_mem: None,
            verbose: false,
            log_var_min: fit.guards.min,
            log_var_max: fit.guards.max,
        }
    }
}

impl OptimizerConfig {
    pub fn to_fit_options(&self) -> PipelineResult<FitOptions> {
        let tols = Tolerances::new(self.tol_grad, self.tol_cost, self.max_iter)?;
        let line_searcher: LineSearcher = self.line_searcher.parse()?;
        let mle_opts = MLEOptions::new(tols, line_searcher, self.verbose, self.lbfgs_mem)?;
        let guards = LogVarianceGuards::new(self.log_var_min, self.log_var_max)?;
        Ok(FitOptions::new(mle_opts, guards))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub price_field: PriceField,
    pub split_ratio: f64,
    pub diagnostics: DiagnosticsOptions,
    pub fit: OptimizerConfig,
    pub search: SearchOptions,
    pub horizon: usize,
    pub bootstrap: Option<BootstrapOptions>,
    pub rolling: Option<RollingOptions>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            price_field: PriceField::Close,
            split_ratio: DEFAULT_SPLIT_RATIO,
            diagnostics: DiagnosticsOptions::default(),
            fit: OptimizerConfig::default(),
            search: SearchOptions::default(),
            horizon: DEFAULT_HORIZON,
            bootstrap: None,
            rolling: None,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> PipelineResult<Self> {
        let cfg: PipelineConfig =
            serde_json::from_str(s).map_err(|e| PipelineError::Config { text: e.to_string() })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(ReturnError::InvalidSplitRatio { ratio: self.split_ratio }.into());
        }
        if self.horizon == 0 {
            return Err(ModelError::InvalidHorizon { horizon: 0 }.into());
        }
        if let Some(boot) = &self.bootstrap {
            boot.validate()?;
        }
        if let Some(rolling) = &self.rolling {
            if rolling.n_rolls == 0 || rolling.n_rolls > rolling.holdout_size {
                return Err(PipelineError::Config {
                    text: format!(
                        "rolling.n_rolls must be in 1..={}, got {}",
                        rolling.holdout_size, rolling.n_rolls
                    ),
                });
            }
        }
        self.fit.to_fit_options().map(|_| ())
    }
}
