//! Custom error types for the cleaning pipeline.
//!
//! Every failure in this crate is terminal for the run: there are no retries
//! and no partial-failure recovery. The variants below exist so callers get a
//! precise diagnostic instead of a stringly-typed panic.

use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Column exists but does not hold numeric data.
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    /// A statistic was requested over a column with no non-missing values.
    #[error("Column '{0}' has no non-missing values")]
    EmptyColumn(String),

    /// Min-max normalization is undefined for a constant column.
    #[error("Column '{0}' is constant (max == min); min-max normalization is undefined")]
    ConstantColumn(String),

    /// A sample was too small for the significance test.
    #[error("{group} has {actual} observations; the t-test needs at least {needed}")]
    InsufficientData {
        group: String,
        needed: usize,
        actual: usize,
    },

    /// Both t-test samples have zero pooled variance.
    #[error("Samples have zero pooled variance; t-statistic is undefined")]
    ZeroVariance,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Plot rendering failed.
    #[error("Failed to render plot: {0}")]
    PlotRender(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
