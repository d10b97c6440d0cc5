//! Common result type for hypothesis tests.
use serde::{Deserialize, Serialize};

/// Test statistic with its p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

impl TestOutcome {
    pub fn new(statistic: f64, p_value: f64) -> Self {
        Self { statistic, p_value: p_value.clamp(0.0, 1.0) }
    }

    /// `true` when the null hypothesis is rejected at level `alpha`.
    pub fn rejects_null(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
