//! models::errors — error surface of the ARMA-eGARCH model layer.
//!
//! Purpose
//! -------
//! Report invalid model specifications, malformed return data, inadmissible
//! parameter vectors, and misuse of the forecasting / bootstrap entry points.
//!
//! Conventions
//! -----------
//! - Estimation failures are *not* errors: a fit that does not converge is a
//!   `FittedModel` carrying `FitStatus::Failed`. `ModelNotConverged` is only
//!   raised when a caller asks a failed fit for something that needs
//!   parameters (forecasts, bootstrap).
//! - Optimizer failures are carried as text so the enum stays `Clone` and
//!   `PartialEq`.
use crate::optimization::errors::OptError;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Specification ----
    /// Unsupported ARMA or variance orders.
    InvalidOrder { ar: usize, ma: usize, reason: &'static str },

    // ---- Data ----
    /// Too few observations for the requested model.
    InsufficientData { needed: usize, found: usize },

    /// Non-finite return at `index`.
    InvalidData { index: usize, value: f64 },

    /// Constant returns; the log-variance anchor is undefined.
    ZeroVariance,

    // ---- Parameters ----
    /// θ does not match the layout implied by the specification.
    InvalidThetaLength { expected: usize, found: usize },

    /// A model-space parameter violates its constraint.
    InvalidParams { name: String, value: f64, reason: &'static str },

    /// Log-variance guards must be finite with `min < max`.
    InvalidLogVarGuards { min: f64, max: f64, reason: &'static str },

    // ---- Forecasting ----
    /// Forecast horizon must be at least 1.
    InvalidHorizon { horizon: usize },

    /// Bootstrap configuration rejected.
    InvalidBootstrapOptions { reason: &'static str },

    /// The model has no estimates to forecast from.
    ModelNotConverged { label: String, reason: String },

    // ---- Optimizer ----
    Optimizer { text: String },
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidOrder { ar, ma, reason } => {
                write!(f, "Invalid model order ARMA({ar},{ma}): {reason}")
            }
            ModelError::InsufficientData { needed, found } => {
                write!(f, "Insufficient data: need at least {needed} returns, found {found}.")
            }
            ModelError::InvalidData { index, value } => {
                write!(f, "Invalid return {value} at index {index}. Must be finite.")
            }
            ModelError::ZeroVariance => write!(f, "Returns have zero sample variance."),
            ModelError::InvalidThetaLength { expected, found } => {
                write!(f, "Parameter vector length mismatch: expected {expected}, found {found}.")
            }
            ModelError::InvalidParams { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}: {reason}")
            }
            ModelError::InvalidLogVarGuards { min, max, reason } => {
                write!(f, "Invalid log-variance guards ({min}, {max}): {reason}")
            }
            ModelError::InvalidHorizon { horizon } => {
                write!(f, "Invalid forecast horizon {horizon}. Must be at least 1.")
            }
            ModelError::InvalidBootstrapOptions { reason } => {
                write!(f, "Invalid bootstrap options: {reason}")
            }
            ModelError::ModelNotConverged { label, reason } => {
                write!(f, "Model {label} did not converge: {reason}")
            }
            ModelError::Optimizer { text } => write!(f, "Optimizer error: {text}"),
        }
    }
}

impl From<OptError> for ModelError {
    fn from(err: OptError) -> Self {
        ModelError::Optimizer { text: err.to_string() }
    }
}
