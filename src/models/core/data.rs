//! Validated estimation sample.
use crate::models::errors::{ModelError, ModelResult};
use ndarray::Array1;

/// Returns used for estimation, with the pre-sample log-variance anchor.
///
/// Invariants: at least two observations, all finite, positive sample
/// variance. `log_var0` is `ln` of the (1/n) sample variance and seeds the
/// variance recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnData {
    pub values: Array1<f64>,
    pub log_var0: f64,
    pub mean: f64,
}

impl ReturnData {
    pub fn new(values: Array1<f64>) -> ModelResult<Self> {
        if values.len() < 2 {
            return Err(ModelError::InsufficientData { needed: 2, found: values.len() });
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidData { index, value });
        }
        let n = values.len() as f64;
        let mean = values.sum() / n;
        let var = values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
        if var <= 0.0 {
            return Err(ModelError::ZeroVariance);
        }
        Ok(Self { values, log_var0: var.ln(), mean })
    }

    pub fn from_slice(values: &[f64]) -> ModelResult<Self> {
        Self::new(Array1::from(values.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
