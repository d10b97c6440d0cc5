//! search::errors — failures of grid search, selection, and rolling refits.
use crate::models::errors::ModelError;

pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Every candidate failed to converge.
    NoConvergedModel { tried: usize },

    /// The candidate grid was empty.
    EmptyGrid,

    /// Rolling-window arguments are inconsistent with the sample.
    InvalidRolling { reason: String },

    Model(ModelError),
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::NoConvergedModel { tried } => {
                write!(f, "None of the {tried} candidate models converged.")
            }
            SearchError::EmptyGrid => write!(f, "The model grid is empty."),
            SearchError::InvalidRolling { reason } => write!(f, "Invalid rolling forecast: {reason}"),
            SearchError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl From<ModelError> for SearchError {
    fn from(err: ModelError) -> Self {
        SearchError::Model(err)
    }
}
