//! returns::errors — failures of the return transform and split.
pub type ReturnResult<T> = Result<T, ReturnError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReturnError {
    /// Not enough rows: `needed` at least, `found` available.
    InsufficientData { needed: usize, found: usize },

    /// Split ratio must lie strictly inside (0, 1).
    InvalidSplitRatio { ratio: f64 },
}

impl std::error::Error for ReturnError {}

impl std::fmt::Display for ReturnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnError::InsufficientData { needed, found } => {
                write!(f, "Insufficient data: need at least {needed} rows, found {found}.")
            }
            ReturnError::InvalidSplitRatio { ratio } => {
                write!(f, "Invalid split ratio {ratio}. Must satisfy 0 < ratio < 1.")
            }
        }
    }
}
