//! statistical_tests::errors — shared error type for the diagnostic tests.
//!
//! Purpose
//! -------
//! One enum for the validation and computation failures of ADF, ACF/PACF,
//! Jarque–Bera and Ljung–Box, so the diagnostics bundle can propagate any
//! of them with `?`.
//!
//! Conventions
//! -----------
//! - Messages are phrased as domain constraints ("1 ≤ lag < n").
//! - Each variant carries the offending value or index.

pub type StatResult<T> = Result<T, StatError>;

#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    /// Series shorter than the test requires.
    InsufficientData { needed: usize, found: usize },

    /// Non-finite element at `index`.
    InvalidData { index: usize, value: f64 },

    /// Lag argument outside its valid range.
    InvalidLag { lag: usize, reason: &'static str },

    /// The series is constant, so moments or autocorrelations are undefined.
    ZeroVariance,

    /// The ADF regression design matrix is rank deficient.
    SingularRegression,

    /// Significance level must lie in (0, 1).
    InvalidSignificance { alpha: f64 },
}

impl std::error::Error for StatError {}

impl std::fmt::Display for StatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatError::InsufficientData { needed, found } => {
                write!(f, "Need at least {needed} observations, found {found}.")
            }
            StatError::InvalidData { index, value } => {
                write!(f, "Invalid data value {value} at index {index}. Must be finite.")
            }
            StatError::InvalidLag { lag, reason } => write!(f, "Invalid lag {lag}: {reason}"),
            StatError::ZeroVariance => write!(f, "Series has zero variance."),
            StatError::SingularRegression => {
                write!(f, "ADF regression design matrix is singular.")
            }
            StatError::InvalidSignificance { alpha } => {
                write!(f, "Invalid significance level {alpha}. Must satisfy 0 < alpha < 1.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages embed the offending payload.
    //
    // Given
    // -----
    // - `InvalidLag { lag: 42, .. }` and `InvalidData { index: 3, value: NaN }`.
    //
    // Expect
    // ------
    // - Messages contain "42" and "3".
    fn display_includes_payload() {
        let msg = StatError::InvalidLag { lag: 42, reason: "too large" }.to_string();
        assert!(msg.contains("42"), "got: {msg}");
        let msg = StatError::InvalidData { index: 3, value: f64::NAN }.to_string();
        assert!(msg.contains('3') && msg.contains("NaN"), "got: {msg}");
    }
}
