//! Configuration for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the canonical air-quality run: impute and filter
//! `Ozone`, `Solar.R`, and `Wind` with a 1.5 IQR multiplier.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Columns imputed and filtered by default, in cascade order.
pub const DEFAULT_COLUMNS: [&str; 3] = ["Ozone", "Solar.R", "Wind"];

/// Default multiplier applied to the IQR when computing outlier bounds.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default number of head rows shown in console output.
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Configuration for the cleaning pipeline.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use aq_clean::config::CleaningConfig;
///
/// let config = CleaningConfig::builder()
///     .columns(["Ozone", "Wind"])
///     .iqr_multiplier(3.0)
///     .render_plots(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Numeric columns to impute and outlier-filter, in cascade order.
    /// The filter order matters: each filter recomputes its quartiles on
    /// the table already narrowed by the previous filters.
    pub columns: Vec<String>,

    /// Multiplier applied to the IQR when computing outlier bounds.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Number of head rows shown in console output.
    /// Default: 5
    pub head_rows: usize,

    /// Output directory for rendered plots and reports.
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// Whether to render the scatter matrix and box plot.
    /// Default: true
    pub render_plots: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            head_rows: DEFAULT_HEAD_ROWS,
            output_dir: PathBuf::from("outputs"),
            render_plots: true,
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.columns.is_empty() {
            return Err(ConfigValidationError::NoColumns);
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("At least one column must be configured")]
    NoColumns,

    #[error("Invalid IQR multiplier: {0} (must be finite and positive)")]
    InvalidIqrMultiplier(f64),
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    columns: Option<Vec<String>>,
    iqr_multiplier: Option<f64>,
    head_rows: Option<usize>,
    output_dir: Option<PathBuf>,
    render_plots: Option<bool>,
}

impl CleaningConfigBuilder {
    /// Set the columns to impute and filter, replacing the defaults.
    ///
    /// Order is significant: filters cascade in the given order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the IQR multiplier for the outlier bounds.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the number of head rows shown in console output.
    pub fn head_rows(mut self, rows: usize) -> Self {
        self.head_rows = Some(rows);
        self
    }

    /// Set the output directory for plots and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enable or disable plot rendering.
    pub fn render_plots(mut self, render: bool) -> Self {
        self.render_plots = Some(render);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let defaults = CleaningConfig::default();
        let config = CleaningConfig {
            columns: self.columns.unwrap_or(defaults.columns),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            head_rows: self.head_rows.unwrap_or(defaults.head_rows),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            render_plots: self.render_plots.unwrap_or(defaults.render_plots),
        };

        config.validate()?;
        Ok(config)
    }
}
