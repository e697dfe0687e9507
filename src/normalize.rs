//! Min-max normalization.

use crate::error::{CleaningError, Result};
use crate::utils::{is_numeric_dtype, numeric_cells};
use polars::prelude::*;

/// Rescale every numeric column of the table to `[0, 1]`.
///
/// Returns a new DataFrame; the input is never mutated. Non-numeric columns
/// are carried through unchanged, and nulls stay null.
///
/// # Errors
///
/// [`CleaningError::ConstantColumn`] when a numeric column has `max == min`
/// (the rescaling denominator is zero, which is surfaced as an explicit error
/// rather than a NaN), and [`CleaningError::EmptyColumn`] when a numeric
/// column has no non-missing values.
pub fn min_max(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    let col_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for col_name in &col_names {
        let col = df.column(col_name)?;
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }

        let cells = numeric_cells(df, col_name)?;
        let present: Vec<f64> = cells.iter().copied().flatten().collect();
        if present.is_empty() {
            return Err(CleaningError::EmptyColumn(col_name.clone()));
        }

        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if span == 0.0 {
            return Err(CleaningError::ConstantColumn(col_name.clone()));
        }

        let scaled: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| cell.map(|val| (val - min) / span))
            .collect();

        out.replace(col_name, Series::new(col_name.as_str().into(), scaled))?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_bounds() {
        let df = df![
            "values" => [2.0, 4.0, 6.0, 10.0],
        ]
        .unwrap();

        let normalized = min_max(&df).unwrap();
        let values = normalized.column("values").unwrap().f64().unwrap();

        assert_eq!(values.min().unwrap(), 0.0);
        assert_eq!(values.max().unwrap(), 1.0);
        assert_eq!(values.get(1).unwrap(), 0.25);
    }

    #[test]
    fn test_min_max_does_not_mutate_input() {
        let df = df![
            "values" => [2.0, 4.0, 6.0],
        ]
        .unwrap();

        let _ = min_max(&df).unwrap();

        let original = df.column("values").unwrap().f64().unwrap();
        assert_eq!(original.get(0).unwrap(), 2.0);
        assert_eq!(original.get(2).unwrap(), 6.0);
    }

    #[test]
    fn test_min_max_constant_column() {
        let df = df![
            "values" => [5.0, 5.0, 5.0, 5.0],
        ]
        .unwrap();

        let result = min_max(&df);
        assert!(matches!(result, Err(CleaningError::ConstantColumn(_))));
    }

    #[test]
    fn test_min_max_preserves_nulls() {
        let df = df![
            "values" => [Some(0.0), None, Some(10.0)],
        ]
        .unwrap();

        let normalized = min_max(&df).unwrap();
        let values = normalized.column("values").unwrap();
        assert_eq!(values.null_count(), 1);
        assert_eq!(values.get(2).unwrap().try_extract::<f64>().unwrap(), 1.0);
    }

    #[test]
    fn test_min_max_passes_through_non_numeric() {
        let df = df![
            "values" => [1.0, 2.0],
            "label" => ["a", "b"],
        ]
        .unwrap();

        let normalized = min_max(&df).unwrap();
        assert_eq!(
            normalized.column("label").unwrap().get(0).unwrap().to_string(),
            "\"a\""
        );
    }

    #[test]
    fn test_min_max_integer_column() {
        let df = df![
            "counts" => [0i64, 5, 10],
        ]
        .unwrap();

        let normalized = min_max(&df).unwrap();
        let values = normalized.column("counts").unwrap().f64().unwrap();
        assert_eq!(values.get(1).unwrap(), 0.5);
    }
}
