//! Shared result types for the cleaning pipeline.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Descriptive statistics for one numeric column.
///
/// The quartiles use linear interpolation between ranks; the standard
/// deviation uses the sample (n-1) denominator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Count of non-missing values.
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Missing-value count for one column, before and after imputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingCount {
    pub column: String,
    pub before: usize,
    pub after: usize,
}

/// Record of one mean imputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputedColumn {
    pub column: String,
    /// The column mean used as the fill value.
    pub fill_value: f64,
    /// Number of cells that were filled.
    pub values_filled: usize,
}

/// Record of one IQR filter application within the cascade.
///
/// Bounds are computed on the table state immediately before this filter
/// ran, not on the original table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStep {
    pub column: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub rows_before: usize,
    pub rows_removed: usize,
}

/// Result of the two-sample Student's t-test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestResult {
    /// The t-statistic.
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Degrees of freedom (n_a + n_b - 2).
    pub df: f64,
}

/// Summary of what the pipeline did to the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after the outlier cascade.
    pub rows_after: usize,
    /// Number of rows removed by the outlier cascade.
    pub rows_removed: usize,
    /// Missing-value counts per column, before and after imputation.
    pub missing_counts: Vec<MissingCount>,
    /// One record per imputed column.
    pub imputations: Vec<ImputedColumn>,
    /// One record per filter in the cascade, in application order.
    pub filter_steps: Vec<FilterStep>,
}

/// Everything the pipeline produces from one run.
///
/// The DataFrames are kept in memory only; nothing is persisted unless the
/// caller writes a report or renders plots.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The imputed and outlier-filtered table.
    pub cleaned: DataFrame,
    /// Min-max normalized copy of the cleaned table.
    pub normalized: DataFrame,
    /// Descriptive statistics over the cleaned table.
    pub column_summaries: Vec<ColumnSummary>,
    /// t-test of the first configured column, original vs. cleaned.
    pub t_test: TTestResult,
    /// Shape and action summary.
    pub summary: CleaningSummary,
    /// Human-readable log of every action taken, in order.
    pub processing_steps: Vec<String>,
}
