//! pipeline::errors — the single error type returned by a pipeline run.
use crate::{
    data::errors::DataError, models::errors::ModelError, optimization::errors::OptError,
    returns::errors::ReturnError, search::errors::SearchError,
    statistical_tests::errors::StatError,
};

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Data(DataError),
    Return(ReturnError),
    Stat(StatError),
    Optimizer(OptError),
    Model(ModelError),
    Search(SearchError),
    /// Configuration could not be parsed or failed validation.
    Config { text: String },
    /// Report rendering failed.
    Serialization { text: String },
}

impl std::error::Error for PipelineError {}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Data(err) => write!(f, "Data error: {err}"),
            PipelineError::Return(err) => write!(f, "Return transform error: {err}"),
            PipelineError::Stat(err) => write!(f, "Diagnostics error: {err}"),
            PipelineError::Optimizer(err) => write!(f, "Optimizer configuration error: {err}"),
            PipelineError::Model(err) => write!(f, "Model error: {err}"),
            PipelineError::Search(err) => write!(f, "Model search error: {err}"),
            PipelineError::Config { text } => write!(f, "Invalid configuration: {text}"),
            PipelineError::Serialization { text } => write!(f, "Could not render report: {text}"),
        }
    }
}

impl From<DataError> for PipelineError {
    fn from(err: DataError) -> Self {
        PipelineError::Data(err)
    }
}

impl From<ReturnError> for PipelineError {
    fn from(err: ReturnError) -> Self {
        PipelineError::Return(err)
    }
}

impl From<StatError> for PipelineError {
    fn from(err: StatError) -> Self {
        PipelineError::Stat(err)
    }
}

impl From<OptError> for PipelineError {
    fn from(err: OptError) -> Self {
        PipelineError::Optimizer(err)
    }
}

impl From<ModelError> for PipelineError {
    fn from(err: ModelError) -> Self {
        PipelineError::Model(err)
    }
}

impl From<SearchError> for PipelineError {
    fn from(err: SearchError) -> Self {
        PipelineError::Search(err)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization { text: err.to_string() }
    }
}
