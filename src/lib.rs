//! Air-Quality Data Cleaning Pipeline
//!
//! A single-pass exploratory cleaning pipeline over a tabular air-quality
//! dataset, built with Rust and Polars.
//!
//! # Overview
//!
//! The pipeline runs the classic cleaning sequence once, top to bottom:
//!
//! - **Loading**: CSV ingestion with schema sniffing and `NA` null markers
//! - **Imputation**: missing numeric cells filled with the column mean
//! - **Outlier Removal**: per-column IQR filters applied as a sequential
//!   cascade, each recomputing quartiles on the already-narrowed table
//! - **Descriptive Statistics**: count/mean/std/min/quartiles/max per column
//! - **Normalization**: min-max rescaling into `[0, 1]`, as a new table
//! - **Visualization**: scatter matrix and box plot rendered to PNG files
//! - **Significance Testing**: Student's t-test of the `Ozone` column
//!   before vs. after cleaning
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aq_clean::{CleaningConfig, Pipeline, loader};
//!
//! let df = loader::read_csv("airquality.csv")?;
//!
//! let outcome = Pipeline::builder()
//!     .config(CleaningConfig::builder().output_dir("outputs").build()?)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .process(df)?;
//!
//! println!("Rows kept: {}", outcome.cleaned.height());
//! println!(
//!     "t = {:.4}, p = {:.4}",
//!     outcome.t_test.statistic, outcome.t_test.p_value
//! );
//! ```
//!
//! # Conventions
//!
//! Quartiles interpolate linearly between ranks, the standard deviation uses
//! the sample (n-1) denominator, and the t-test is the pooled-variance
//! Student's form. Statistics are always recomputed from the current table
//! state; nothing is cached. Undefined statistics (all-missing columns,
//! constant columns under normalization) are typed errors, never silent NaNs.

pub mod config;
pub mod error;
pub mod imputer;
pub mod loader;
pub mod normalize;
pub mod outliers;
pub mod pipeline;
#[cfg(feature = "plots")]
pub mod plot;
pub mod report;
pub mod stats;
pub mod ttest;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputer::MeanImputer;
pub use outliers::OutlierFilter;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate,
};
pub use report::{CleaningReport, ReportGenerator};
pub use types::{
    CleaningSummary, ColumnSummary, FilterStep, ImputedColumn, MissingCount, PipelineOutcome,
    TTestResult,
};
