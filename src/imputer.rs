//! Mean imputation for numeric columns.

use crate::error::{CleaningError, Result};
use crate::utils::{fill_numeric_nulls, is_numeric_dtype};
use polars::prelude::*;

/// Fills missing numeric cells with the column mean.
pub struct MeanImputer;

impl MeanImputer {
    /// Replace every null in `col_name` with the mean of its non-null values.
    ///
    /// Returns the mean used as the fill value. The fill preserves the column
    /// mean: averaging after imputation yields the same value as before.
    ///
    /// # Errors
    ///
    /// [`CleaningError::ColumnNotFound`] if the column is absent,
    /// [`CleaningError::NotNumeric`] if it is not numeric, and
    /// [`CleaningError::EmptyColumn`] if every cell is missing (the mean is
    /// undefined, which is fatal rather than silently propagated as NaN).
    pub fn fill_mean(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<f64> {
        let col = df
            .column(col_name)
            .map_err(|_| CleaningError::ColumnNotFound(col_name.to_string()))?;
        let series = col.as_materialized_series();

        if !is_numeric_dtype(series.dtype()) {
            return Err(CleaningError::NotNumeric(col_name.to_string()));
        }

        let mean_val = series
            .mean()
            .ok_or_else(|| CleaningError::EmptyColumn(col_name.to_string()))?;

        let null_count = series.null_count();
        let series_clone = series.clone();
        let filled = fill_numeric_nulls(&series_clone, mean_val)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled '{}' with mean: {:.2} ({} values)",
            col_name, mean_val, null_count
        ));

        Ok(mean_val)
    }

    /// Null counts per column over the current table state.
    pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }
}
