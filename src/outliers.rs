//! IQR-based outlier removal.
//!
//! Filters are applied as a sequential cascade: each filter recomputes its
//! quartiles on the table already narrowed by the previous filters. The
//! cascading is intentional and order-dependent; reordering the columns
//! changes which rows survive.

use crate::error::{CleaningError, Result};
use crate::stats::quantile;
use crate::types::FilterStep;
use crate::utils::{numeric_cells, numeric_values};
use polars::prelude::*;
use tracing::debug;

/// Removes rows whose value in a column falls outside the IQR bounds.
pub struct OutlierFilter;

impl OutlierFilter {
    /// Compute `[Q1 - k·IQR, Q3 + k·IQR]` for a column over the current rows.
    ///
    /// Quartiles interpolate linearly between ranks and are computed over
    /// the column's non-missing values.
    pub fn iqr_bounds(df: &DataFrame, column: &str, multiplier: f64) -> Result<(f64, f64)> {
        let mut values = numeric_values(df, column)?;
        if values.is_empty() {
            return Err(CleaningError::EmptyColumn(column.to_string()));
        }

        values.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&values, 0.25);
        let q3 = quantile(&values, 0.75);
        let iqr = q3 - q1;

        Ok((q1 - multiplier * iqr, q3 + multiplier * iqr))
    }

    /// Keep only the rows whose value in `column` lies inside the IQR bounds.
    ///
    /// A missing value is not inside any interval, so rows with a null in
    /// `column` are dropped. Returns the filtered table and a record of the
    /// bounds and row counts.
    pub fn filter_column(
        df: &DataFrame,
        column: &str,
        multiplier: f64,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, FilterStep)> {
        let (lower_bound, upper_bound) = Self::iqr_bounds(df, column, multiplier)?;

        let cells = numeric_cells(df, column)?;
        let mask_values: Vec<bool> = cells
            .iter()
            .map(|cell| match cell {
                Some(val) => *val >= lower_bound && *val <= upper_bound,
                None => false,
            })
            .collect();

        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        let filtered = df.filter(&mask)?;

        let rows_before = df.height();
        let rows_removed = rows_before - filtered.height();

        processing_steps.push(format!(
            "Filtered '{}' to [{:.2}, {:.2}]: removed {} rows",
            column, lower_bound, upper_bound, rows_removed
        ));
        debug!(
            "Filtered '{}': bounds [{}, {}], {} rows removed",
            column, lower_bound, upper_bound, rows_removed
        );

        Ok((
            filtered,
            FilterStep {
                column: column.to_string(),
                lower_bound,
                upper_bound,
                rows_before,
                rows_removed,
            },
        ))
    }

    /// Apply [`Self::filter_column`] for each column in order.
    ///
    /// Later filters see a row set already narrowed by the earlier ones, so
    /// the row count is monotonically non-increasing across the cascade.
    pub fn filter_cascade(
        df: DataFrame,
        columns: &[String],
        multiplier: f64,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, Vec<FilterStep>)> {
        let mut current = df;
        let mut steps = Vec::with_capacity(columns.len());

        for column in columns {
            let (filtered, step) =
                Self::filter_column(&current, column, multiplier, processing_steps)?;
            current = filtered;
            steps.push(step);
        }

        Ok((current, steps))
    }
}
