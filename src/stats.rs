//! Descriptive statistics over the current table state.
//!
//! Everything here is recomputed from scratch on each call; nothing is
//! cached. Quantiles interpolate linearly between ranks, matching the
//! convention the outlier bounds rely on.

use crate::error::{CleaningError, Result};
use crate::types::ColumnSummary;
use crate::utils::{is_numeric_dtype, numeric_values};
use polars::prelude::*;

/// Quantile of an ascending-sorted slice, by linear interpolation between
/// ranks.
///
/// `q` is clamped to `[0, 1]`. The slice must be non-empty and sorted.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let q = q.clamp(0.0, 1.0);
    let rank = (n - 1) as f64 * q;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;

    if lo + 1 < n {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

/// Sample standard deviation (n-1 denominator).
///
/// Returns 0.0 for fewer than two values.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Summarize one numeric column: count, mean, std, min, quartiles, max.
pub fn summarize_column(df: &DataFrame, column: &str) -> Result<ColumnSummary> {
    let mut values = numeric_values(df, column)?;
    if values.is_empty() {
        return Err(CleaningError::EmptyColumn(column.to_string()));
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = sample_std(&values, mean);

    Ok(ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[count - 1],
    })
}

/// Summarize every numeric column of the table.
///
/// Pure: the table is not mutated. Non-numeric columns are skipped.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::new();

    for col in df.get_columns() {
        if is_numeric_dtype(col.dtype()) {
            summaries.push(summarize_column(df, col.name().as_str())?);
        }
    }

    Ok(summaries)
}
