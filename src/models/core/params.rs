//! ArmaEgarchParams — model-space parameters and the θ ↔ parameter maps.
//!
//! Purpose
//! -------
//! Hold the natural parameters of one ARMA(p, q)-eGARCH(1,1)-t model and
//! translate between them and the unconstrained vector `θ` the optimizer
//! works on.
//!
//! Key behaviors
//! -------------
//! - θ layout: `[μ?, ar_raw(p), ma_raw(q), ω, α, β_raw, γ, ν_raw]`, with `μ`
//!   present only when the spec includes a mean.
//! - AR coefficients come from `ar_raw` through `tanh` partial
//!   autocorrelations and Durbin–Levinson, so the AR polynomial is always
//!   stationary. MA coefficients use the same map with a sign flip, so the MA
//!   polynomial is always invertible.
//! - `β = (1 − margin)·tanh(β_raw)` keeps the log-variance recursion stable;
//!   `ν = 2 + NU_FLOOR + softplus(ν_raw)` keeps the variance of `z` finite.
//! - `ω`, `α`, `γ` are unconstrained.
//!
//! Conventions
//! -----------
//! - Coefficient names follow the usual ARMA-GARCH reporting convention:
//!   `mu, ar1.., ma1.., omega, alpha1, beta1, gamma1, shape`.
use crate::{
    models::{
        core::{data::ReturnData, spec::ModelSpec},
        errors::{ModelError, ModelResult},
    },
    optimization::numerical_stability::transformations::{
        bounded_tanh, bounded_tanh_inv, coefficients_to_pacf, pacf_to_coefficients, safe_softplus,
        safe_softplus_inv,
    },
};
use ndarray::{Array1, ArrayView1, s};
use serde::Serialize;

/// Distance kept between `ν` and 2.
pub const NU_FLOOR: f64 = 0.1;

const START_BETA: f64 = 0.9;
const START_GAMMA: f64 = 0.1;
const START_NU: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmaEgarchParams {
    pub mu: f64,
    pub ar: Array1<f64>,
    pub ma: Array1<f64>,
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub shape: f64,
}

impl ArmaEgarchParams {
    /// Map optimizer-space `θ` to model space.
    ///
    /// # Errors
    /// `InvalidThetaLength` when `θ` does not match `spec.n_params()`.
    pub fn from_theta(theta: ArrayView1<f64>, spec: &ModelSpec) -> ModelResult<Self> {
        check_len(theta.len(), spec)?;
        let (p, q) = (spec.ar_order, spec.ma_order);
        let mut i = 0;
        let mu = if spec.include_mean {
            i += 1;
            theta[0]
        } else {
            0.0
        };
        let ar = pacf_to_coefficients(theta.slice(s![i..i + p]));
        i += p;
        let ma = -pacf_to_coefficients(theta.slice(s![i..i + q]));
        i += q;
        Ok(Self {
            mu,
            ar,
            ma,
            omega: theta[i],
            alpha: theta[i + 1],
            beta: bounded_tanh(theta[i + 2]),
            gamma: theta[i + 3],
            shape: 2.0 + NU_FLOOR + safe_softplus(theta[i + 4]),
        })
    }

    /// Inverse of [`from_theta`](Self::from_theta), up to the clamping at the
    /// stationarity margin.
    pub fn to_theta(&self, spec: &ModelSpec) -> Array1<f64> {
        let mut theta = Vec::with_capacity(spec.n_params());
        if spec.include_mean {
            theta.push(self.mu);
        }
        theta.extend(coefficients_to_pacf(self.ar.view()).iter());
        theta.extend(coefficients_to_pacf((-&self.ma).view()).iter());
        theta.push(self.omega);
        theta.push(self.alpha);
        theta.push(bounded_tanh_inv(self.beta));
        theta.push(self.gamma);
        theta.push(safe_softplus_inv(self.shape - 2.0 - NU_FLOOR));
        Array1::from(theta)
    }

    /// Natural parameters in reporting order (see [`coefficient_names`]).
    pub fn to_natural(&self, spec: &ModelSpec) -> Array1<f64> {
        let mut out = Vec::with_capacity(spec.n_params());
        if spec.include_mean {
            out.push(self.mu);
        }
        out.extend(self.ar.iter());
        out.extend(self.ma.iter());
        out.extend([self.omega, self.alpha, self.beta, self.gamma, self.shape]);
        Array1::from(out)
    }

    /// Build from natural parameters, checking `|β| < 1` and `ν > 2`.
    ///
    /// ARMA coefficients are taken as given; this is the entry point for
    /// local perturbations around an estimate.
    pub fn from_natural(x: ArrayView1<f64>, spec: &ModelSpec) -> ModelResult<Self> {
        check_len(x.len(), spec)?;
        let (p, q) = (spec.ar_order, spec.ma_order);
        let mut i = 0;
        let mu = if spec.include_mean {
            i += 1;
            x[0]
        } else {
            0.0
        };
        let ar = x.slice(s![i..i + p]).to_owned();
        i += p;
        let ma = x.slice(s![i..i + q]).to_owned();
        i += q;
        let params = Self {
            mu,
            ar,
            ma,
            omega: x[i],
            alpha: x[i + 1],
            beta: x[i + 2],
            gamma: x[i + 3],
            shape: x[i + 4],
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> ModelResult<()> {
        let named = [
            ("mu", self.mu),
            ("omega", self.omega),
            ("alpha1", self.alpha),
            ("beta1", self.beta),
            ("gamma1", self.gamma),
            ("shape", self.shape),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ModelError::InvalidParams {
                    name: name.to_string(),
                    value,
                    reason: "must be finite.",
                });
            }
        }
        if self.beta.abs() >= 1.0 {
            return Err(ModelError::InvalidParams {
                name: "beta1".to_string(),
                value: self.beta,
                reason: "|beta1| must be < 1 for a stable log-variance recursion.",
            });
        }
        if self.shape <= 2.0 {
            return Err(ModelError::InvalidParams {
                name: "shape".to_string(),
                value: self.shape,
                reason: "shape must be > 2 for unit-variance innovations.",
            });
        }
        Ok(())
    }

    /// Unconditional expectation of `ln σ²`: `ω / (1 − β)`.
    pub fn unconditional_log_var(&self) -> f64 {
        self.omega / (1.0 - self.beta)
    }
}

/// `mu, ar1.., ma1.., omega, alpha1, beta1, gamma1, shape`.
pub fn coefficient_names(spec: &ModelSpec) -> Vec<String> {
    let mut names = Vec::with_capacity(spec.n_params());
    if spec.include_mean {
        names.push("mu".to_string());
    }
    names.extend((1..=spec.ar_order).map(|i| format!("ar{i}")));
    names.extend((1..=spec.ma_order).map(|j| format!("ma{j}")));
    names.extend(["omega", "alpha1", "beta1", "gamma1", "shape"].map(String::from));
    names
}

/// Starting point for the optimizer.
///
/// White-noise mean at the sample mean, `β = 0.9` with `ω` chosen so the
/// unconditional log-variance equals the sample one, a small positive
/// leverage-free size effect `γ = 0.1`, and `ν = 8`.
pub fn initial_theta(spec: &ModelSpec, data: &ReturnData) -> Array1<f64> {
    let params = ArmaEgarchParams {
        mu: if spec.include_mean { data.mean } else { 0.0 },
        ar: Array1::zeros(spec.ar_order),
        ma: Array1::zeros(spec.ma_order),
        omega: (1.0 - START_BETA) * data.log_var0,
        alpha: 0.0,
        beta: START_BETA,
        gamma: START_GAMMA,
        shape: START_NU,
    };
    params.to_theta(spec)
}

fn check_len(found: usize, spec: &ModelSpec) -> ModelResult<()> {
    let expected = spec.n_params();
    if found != expected {
        return Err(ModelError::InvalidThetaLength { expected, found });
    }
    Ok(())
}
