//! pipeline — end-to-end volatility report for one symbol.
//!
//! Purpose
//! -------
//! Chain the stages of the crate into a single call: fetch daily prices,
//! convert to log returns, run the advisory diagnostics, split into
//! train/test, fit the model grid, select by information criterion, and
//! forecast (optionally with bootstrap bands and rolling refits).
//!
//! Key behaviors
//! -------------
//! - [`Pipeline::run`] is the only entry point and returns a [`Report`] or
//!   a [`PipelineError`]. Stages pass immutable values to each other.
//! - Diagnostics never gate fitting. A non-stationary return series is
//!   logged at `warn`; a diagnostic that cannot be computed at all (too
//!   short for the ADF lag order, a constant window) is logged at `warn`,
//!   recorded in the report, and the run continues.
//! - Progress is logged through `tracing` at stage boundaries; installing a
//!   subscriber is left to the caller.
pub mod config;
pub mod errors;
pub mod report;

pub use self::config::{OptimizerConfig, PipelineConfig, RunParams};
pub use self::errors::{PipelineError, PipelineResult};
pub use self::report::{CandidateSummary, Report, SelectedModel};

use crate::{
    data::MarketDataProvider,
    models::{MODEL_GRID, ModelSpec, bootstrap_forecast},
    returns::{split, to_log_returns},
    search::{fit_grid, rolling_forecast, select},
    statistical_tests::Diagnostics,
};
use tracing::{debug, info, warn};

pub struct Pipeline<P: MarketDataProvider> {
    provider: P,
    config: PipelineConfig,
    grid: Vec<ModelSpec>,
}

impl<P: MarketDataProvider> Pipeline<P> {
    /// Pipeline over the standard eight-model grid.
    pub fn new(provider: P, config: PipelineConfig) -> Self {
        Pipeline { provider, config, grid: MODEL_GRID.to_vec() }
    }

    /// Replace the candidate grid.
    pub fn with_grid(mut self, grid: Vec<ModelSpec>) -> Self {
        self.grid = grid;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, params: &RunParams) -> PipelineResult<Report> {
        let cfg = &self.config;
        cfg.validate()?;
        let fit_opts = cfg.fit.to_fit_options()?;

        info!(symbol = %params.symbol, start = %params.start, end = %params.end, "fetching prices");
        let prices = self.provider.fetch_daily(&params.symbol, params.start, params.end)?;
        let returns = to_log_returns(&prices, cfg.price_field)?;
        debug!(n_prices = prices.len(), n_returns = returns.len(), "log returns computed");

        let checked =
            Diagnostics::run(&prices.values(cfg.price_field), returns.values(), &cfg.diagnostics);
        let (diagnostics, diagnostics_error) = match checked {
            Ok(diagnostics) => {
                info!(
                    prices_stationary = diagnostics.prices_stationary,
                    returns_stationary = diagnostics.returns_stationary,
                    returns_normal = diagnostics.returns_normal,
                    "diagnostics done"
                );
                if !diagnostics.returns_stationary {
                    warn!(
                        p_value = diagnostics.return_adf.p_value,
                        "ADF does not reject a unit root in returns; fitting anyway"
                    );
                }
                (Some(diagnostics), None)
            }
            Err(err) => {
                warn!(error = %err, "diagnostics unavailable; fitting anyway");
                (None, Some(err.to_string()))
            }
        };

        let parts = split(&returns, cfg.split_ratio)?;
        info!(n_train = parts.train.returns().len(), n_test = parts.test.returns().len(), "split");

        let models = fit_grid(&parts.train, &self.grid, &fit_opts, &cfg.search)?;
        let best = select(&models)?;
        info!(model = %best.label, score = best.score, criterion = cfg.search.criterion.name(), "selected");

        let mut forecast = best.forecast(cfg.horizon)?;
        if let Some(boot) = &cfg.bootstrap {
            forecast.bootstrap = Some(bootstrap_forecast(best, cfg.horizon, boot)?);
            debug!(n_paths = boot.n_paths, mode = ?boot.mode, "bootstrap bands attached");
        }

        let rolling = match &cfg.rolling {
            Some(r) => {
                let rolls = rolling_forecast(
                    &best.spec,
                    &returns,
                    r.holdout_size,
                    cfg.horizon,
                    r.n_rolls,
                    &fit_opts,
                )?;
                info!(n_rolls = rolls.len(), "rolling forecasts done");
                Some(rolls)
            }
            None => None,
        };

        Ok(Report {
            symbol: params.symbol.clone(),
            start: prices.first_date(),
            end: prices.last_date(),
            n_prices: prices.len(),
            n_returns: returns.len(),
            n_train: parts.train.returns().len(),
            n_test: parts.test.returns().len(),
            diagnostics,
            diagnostics_error,
            criterion: cfg.search.criterion,
            candidates: models.iter().map(CandidateSummary::from).collect(),
            selected: SelectedModel::from(best),
            forecast,
            rolling,
        })
    }
}
