//! data::errors — failures while acquiring or validating price history.
//!
//! Every variant is fatal to a pipeline run; the data layer never retries.
use chrono::NaiveDate;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// The provider could not supply a usable series for `symbol`.
    DataUnavailable { symbol: String, reason: String },

    /// A series needs at least one bar.
    EmptySeries,

    /// Dates must be unique and strictly increasing.
    NonIncreasingDates { index: usize, previous: NaiveDate, current: NaiveDate },

    /// Prices must be finite and strictly positive.
    InvalidPrice { index: usize, field: &'static str, value: f64 },

    /// Volume must be finite and non-negative.
    InvalidVolume { index: usize, value: f64 },

    /// `start` must not be after `end`.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Malformed CSV row or header.
    Csv { text: String },

    /// File-system failure while reading a source.
    Io { text: String },
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::DataUnavailable { symbol, reason } => {
                write!(f, "No data available for '{symbol}': {reason}")
            }
            DataError::EmptySeries => write!(f, "Price series is empty."),
            DataError::NonIncreasingDates { index, previous, current } => write!(
                f,
                "Dates must be strictly increasing: bar {index} has {current} after {previous}."
            ),
            DataError::InvalidPrice { index, field, value } => {
                write!(f, "Invalid {field} price {value} at bar {index}. Must be finite and > 0.")
            }
            DataError::InvalidVolume { index, value } => {
                write!(f, "Invalid volume {value} at bar {index}. Must be finite and >= 0.")
            }
            DataError::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}.")
            }
            DataError::Csv { text } => write!(f, "CSV error: {text}"),
            DataError::Io { text } => write!(f, "I/O error: {text}"),
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv { text: err.to_string() }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io { text: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages carry the offending payload.
    //
    // Given
    // -----
    // - `InvalidPrice` at bar 7 with value -3.5, and `DataUnavailable` for "XYZ".
    //
    // Expect
    // ------
    // - Messages contain "7", "-3.5" and "XYZ" respectively.
    fn display_includes_payload() {
        let msg = DataError::InvalidPrice { index: 7, field: "close", value: -3.5 }.to_string();
        assert!(msg.contains('7') && msg.contains("-3.5"), "got: {msg}");

        let msg = DataError::DataUnavailable { symbol: "XYZ".into(), reason: "unknown".into() }
            .to_string();
        assert!(msg.contains("XYZ"), "got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // I/O errors convert into `DataError::Io` with their message preserved.
    //
    // Given
    // -----
    // - A `NotFound` io error with text "missing file".
    //
    // Expect
    // ------
    // - `DataError::Io` whose text contains "missing file".
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        match DataError::from(io) {
            DataError::Io { text } => assert!(text.contains("missing file")),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
