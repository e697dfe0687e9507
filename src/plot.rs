//! Plot rendering.
//!
//! Side-effect-only collaborator: renders a pairwise scatter matrix and a
//! box plot of the cleaned table to PNG files. Nothing here feeds back into
//! the cleaning or statistics stages.

use crate::error::{CleaningError, Result};
use crate::utils::{is_numeric_dtype, numeric_cells};
use plotters::prelude::*;
use polars::prelude::DataFrame;
use std::path::Path;
use tracing::info;

const CELL_PIXELS: u32 = 220;

struct NumericColumn {
    name: String,
    cells: Vec<Option<f64>>,
    min: f64,
    max: f64,
}

/// Collect the numeric columns of the table, row-aligned, skipping columns
/// with no present values.
fn numeric_columns(df: &DataFrame) -> Result<Vec<NumericColumn>> {
    let mut columns = Vec::new();

    for col in df.get_columns() {
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }
        let name = col.name().to_string();
        let cells = numeric_cells(df, &name)?;
        let present: Vec<f64> = cells.iter().copied().flatten().collect();
        if present.is_empty() {
            continue;
        }
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        columns.push(NumericColumn {
            name,
            cells,
            min,
            max,
        });
    }

    if columns.is_empty() {
        return Err(CleaningError::PlotRender(
            "no numeric columns to plot".to_string(),
        ));
    }

    Ok(columns)
}

/// Axis range with a small margin; degenerate spans get a unit pad.
fn padded_range(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    let pad = if span == 0.0 { 1.0 } else { span * 0.05 };
    (min - pad)..(max + pad)
}

/// Render a pairwise scatter grid over all numeric columns.
pub fn scatter_matrix(df: &DataFrame, path: &Path) -> Result<()> {
    let columns = numeric_columns(df)?;
    let n = columns.len();
    let side = CELL_PIXELS * n as u32;

    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

    let areas = root.split_evenly((n, n));

    for row in 0..n {
        for col in 0..n {
            let area = &areas[row * n + col];

            if row == col {
                let (w, h) = area.dim_in_pixel();
                area.draw(&Text::new(
                    columns[row].name.clone(),
                    (w as i32 / 2 - 4 * columns[row].name.len() as i32, h as i32 / 2),
                    ("sans-serif", 16),
                ))
                .map_err(|e| CleaningError::PlotRender(e.to_string()))?;
                continue;
            }

            let x_col = &columns[col];
            let y_col = &columns[row];

            let points: Vec<(f64, f64)> = x_col
                .cells
                .iter()
                .zip(y_col.cells.iter())
                .filter_map(|(x, y)| (*x).zip(*y))
                .collect();

            let mut chart = ChartBuilder::on(area)
                .margin(4)
                .x_label_area_size(18)
                .y_label_area_size(28)
                .build_cartesian_2d(
                    padded_range(x_col.min, x_col.max),
                    padded_range(y_col.min, y_col.max),
                )
                .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(3)
                .y_labels(3)
                .label_style(("sans-serif", 9))
                .draw()
                .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|(x, y)| Circle::new((*x, *y), 2, BLUE.filled())),
                )
                .map_err(|e| CleaningError::PlotRender(e.to_string()))?;
        }
    }

    root.present()
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;
    info!("Scatter matrix written to {}", path.display());

    Ok(())
}

/// Render one box per numeric column, quartiles over the present values.
pub fn box_plot(df: &DataFrame, path: &Path) -> Result<()> {
    let columns = numeric_columns(df)?;

    let y_min = columns.iter().map(|c| c.min).fold(f64::INFINITY, f64::min);
    let y_max = columns
        .iter()
        .map(|c| c.max)
        .fold(f64::NEG_INFINITY, f64::max);

    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();

    let root = BitMapBackend::new(path, (960, 540)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

    let y_range = padded_range(y_min, y_max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Boxplot of Cleaned Data", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(32)
        .y_label_area_size(48)
        .build_cartesian_2d(
            names[..].into_segmented(),
            (y_range.start as f32)..(y_range.end as f32),
        )
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .draw()
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

    chart
        .draw_series(names.iter().zip(columns.iter()).map(|(name, col)| {
            let present: Vec<f64> = col.cells.iter().copied().flatten().collect();
            Boxplot::new_vertical(SegmentValue::CenterOf(name), &Quartiles::new(&present))
        }))
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;

    root.present()
        .map_err(|e| CleaningError::PlotRender(e.to_string()))?;
    info!("Box plot written to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_numeric_columns_skips_strings_and_empty() {
        let df = df![
            "x" => [1.0, 2.0],
            "label" => ["a", "b"],
            "empty" => [Option::<f64>::None, None],
        ]
        .unwrap();

        let columns = numeric_columns(&df).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "x");
        assert_eq!(columns[0].min, 1.0);
        assert_eq!(columns[0].max, 2.0);
    }

    #[test]
    fn test_numeric_columns_none_is_error() {
        let df = df![
            "label" => ["a", "b"],
        ]
        .unwrap();

        let result = numeric_columns(&df);
        assert!(matches!(result, Err(CleaningError::PlotRender(_))));
    }

    #[test]
    fn test_padded_range_degenerate_span() {
        let range = padded_range(5.0, 5.0);
        assert_eq!(range, 4.0..6.0);
    }
}
