//! Model specifications and the fixed candidate grid.
use crate::models::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Conditional variance equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarianceModel {
    /// Exponential GARCH; only `(1, 1)` is supported.
    EGarch { p: usize, q: usize },
}

/// Innovation law of the standardized residuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distribution {
    /// Student-t rescaled to unit variance, `ν > 2` estimated.
    StudentT,
}

/// One ARMA-mean / eGARCH-variance / Student-t candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelSpec {
    pub ar_order: usize,
    pub ma_order: usize,
    pub variance: VarianceModel,
    pub distribution: Distribution,
    pub include_mean: bool,
}

impl ModelSpec {
    /// ARMA(p, q) mean with a constant, eGARCH(1,1), Student-t.
    pub const fn arma(ar_order: usize, ma_order: usize) -> Self {
        ModelSpec {
            ar_order,
            ma_order,
            variance: VarianceModel::EGarch { p: 1, q: 1 },
            distribution: Distribution::StudentT,
            include_mean: true,
        }
    }

    /// Reject orders the estimator does not handle.
    pub fn validate(&self) -> ModelResult<()> {
        let VarianceModel::EGarch { p, q } = self.variance;
        if p != 1 || q != 1 {
            return Err(ModelError::InvalidOrder {
                ar: self.ar_order,
                ma: self.ma_order,
                reason: "only eGARCH(1,1) variance is supported.",
            });
        }
        if self.ar_order > MAX_ARMA_ORDER || self.ma_order > MAX_ARMA_ORDER {
            return Err(ModelError::InvalidOrder {
                ar: self.ar_order,
                ma: self.ma_order,
                reason: "ARMA orders above 5 are not supported.",
            });
        }
        Ok(())
    }

    /// Number of free parameters: mean, AR, MA, (ω, α, β, γ), ν.
    pub fn n_params(&self) -> usize {
        usize::from(self.include_mean) + self.ar_order + self.ma_order + 4 + 1
    }

    /// `"ARMA(p,q)-eGARCH(1,1)-std"`.
    pub fn label(&self) -> String {
        let VarianceModel::EGarch { p, q } = self.variance;
        let dist = match self.distribution {
            Distribution::StudentT => "std",
        };
        format!("ARMA({},{})-eGARCH({p},{q})-{dist}", self.ar_order, self.ma_order)
    }

    /// Observations required before estimation is attempted.
    pub fn min_observations(&self) -> usize {
        (2 * self.n_params()).max(MIN_OBSERVATIONS)
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

pub const MAX_ARMA_ORDER: usize = 5;
pub const MIN_OBSERVATIONS: usize = 30;

/// The candidate grid, in selection tie-break order.
pub const MODEL_GRID: [ModelSpec; 8] = [
    ModelSpec::arma(0, 0),
    ModelSpec::arma(1, 0),
    ModelSpec::arma(0, 1),
    ModelSpec::arma(1, 1),
    ModelSpec::arma(2, 0),
    ModelSpec::arma(0, 2),
    ModelSpec::arma(2, 2),
    ModelSpec::arma(3, 3),
];
