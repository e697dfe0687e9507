//! Shared utilities for the cleaning pipeline.

use crate::error::{CleaningError, Result};
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Extract the non-missing values of a numeric column as `f64`.
///
/// Fails with [`CleaningError::ColumnNotFound`] when the column is absent and
/// [`CleaningError::NotNumeric`] when it holds non-numeric data. An empty
/// result is not an error here; callers that need at least one value check
/// for themselves.
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let col = df
        .column(column)
        .map_err(|_| CleaningError::ColumnNotFound(column.to_string()))?;
    let series = col.as_materialized_series();

    if !is_numeric_dtype(series.dtype()) {
        return Err(CleaningError::NotNumeric(column.to_string()));
    }

    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().flatten().collect())
}

/// Per-row view of a numeric column, nulls preserved as `None`.
pub fn numeric_cells(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(column)
        .map_err(|_| CleaningError::ColumnNotFound(column.to_string()))?;
    let series = col.as_materialized_series();

    if !is_numeric_dtype(series.dtype()) {
        return Err(CleaningError::NotNumeric(column.to_string()));
    }

    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always `Float64`, mirroring how a mean fill widens an
/// integer column.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}
