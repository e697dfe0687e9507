//! Main cleaning pipeline.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the cleaning workflow: impute → filter cascade →
//! summarize → normalize → render → t-test. Each stage takes and returns
//! an explicit DataFrame value; nothing is cached between stages.

use crate::config::CleaningConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::imputer::MeanImputer;
use crate::normalize;
use crate::outliers::OutlierFilter;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::stats;
use crate::ttest;
use crate::types::{CleaningSummary, ImputedColumn, MissingCount, PipelineOutcome};
use crate::utils::numeric_values;
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The main cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use aq_clean::{CleaningConfig, Pipeline};
///
/// let outcome = Pipeline::builder()
///     .config(CleaningConfig::builder().render_plots(false).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .process(df)?;
///
/// println!("t = {:.4}, p = {:.4}", outcome.t_test.statistic, outcome.t_test.p_value);
/// ```
pub struct Pipeline {
    config: CleaningConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// Ensure Pipeline can be moved to a worker thread
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Run the cleaning pipeline over a DataFrame.
    ///
    /// Returns a [`PipelineOutcome`] with the cleaned and normalized tables,
    /// descriptive statistics, and the t-test result. Any stage error aborts
    /// the run.
    pub fn process(&self, df: DataFrame) -> Result<PipelineOutcome> {
        match self.process_internal(df) {
            Ok(outcome) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(outcome)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_internal(&self, mut df: DataFrame) -> Result<PipelineOutcome> {
        let start_time = Instant::now();

        info!("Starting cleaning pipeline...");
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Initializing,
            0.0,
            "Starting cleaning pipeline...",
        ));

        let rows_before = df.height();
        let mut processing_steps: Vec<String> = Vec::new();

        // The first configured column doubles as the t-test subject; its
        // pre-imputation values are the baseline sample.
        let test_column = self
            .config
            .columns
            .first()
            .cloned()
            .ok_or_else(|| CleaningError::InvalidConfig("no columns configured".to_string()))?;
        let baseline = numeric_values(&df, &test_column)
            .context(format!("While recording baseline for '{}'", test_column))?;

        let missing_before = MeanImputer::missing_counts(&df);

        // Step 1: mean imputation per configured column
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Imputation,
            0.1,
            "Imputing missing values...",
        ));
        info!("Step 1: Imputing missing values with column means...");

        let mut imputations = Vec::with_capacity(self.config.columns.len());
        for column in &self.config.columns {
            let nulls = df
                .column(column)
                .map_err(|_| CleaningError::ColumnNotFound(column.clone()))?
                .null_count();
            let fill_value = MeanImputer::fill_mean(&mut df, column, &mut processing_steps)
                .context(format!("While imputing '{}'", column))?;
            imputations.push(ImputedColumn {
                column: column.clone(),
                fill_value,
                values_filled: nulls,
            });
        }

        let missing_after = MeanImputer::missing_counts(&df);
        let missing_counts: Vec<MissingCount> = missing_before
            .into_iter()
            .zip(missing_after)
            .map(|((column, before), (_, after))| MissingCount {
                column,
                before,
                after,
            })
            .collect();
        debug!(
            "Missing values remaining after imputation: {}",
            missing_counts.iter().map(|m| m.after).sum::<usize>()
        );

        // Step 2: sequential IQR outlier cascade
        self.report_progress(ProgressUpdate::new(
            CleaningStage::OutlierFiltering,
            0.3,
            "Removing outlier rows...",
        ));
        info!("Step 2: Removing outliers via the IQR cascade...");

        let (cleaned, filter_steps) = OutlierFilter::filter_cascade(
            df,
            &self.config.columns,
            self.config.iqr_multiplier,
            &mut processing_steps,
        )?;
        let rows_after = cleaned.height();
        info!(
            "Cleaned shape: {:?} ({} rows removed)",
            (rows_after, cleaned.width()),
            rows_before - rows_after
        );

        // Step 3: descriptive statistics over the cleaned table
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Summarizing,
            0.5,
            "Computing descriptive statistics...",
        ));
        info!("Step 3: Computing descriptive statistics...");
        let column_summaries = stats::describe(&cleaned)?;

        // Step 4: min-max normalization into a new table
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Normalizing,
            0.65,
            "Normalizing columns to [0, 1]...",
        ));
        info!("Step 4: Min-max normalizing...");
        let normalized = normalize::min_max(&cleaned)?;
        processing_steps.push("Min-max normalized all numeric columns".to_string());

        // Step 5: plots (side effect only)
        if self.config.render_plots {
            self.report_progress(ProgressUpdate::new(
                CleaningStage::Rendering,
                0.8,
                "Rendering plots...",
            ));
            self.render_plots(&cleaned, &mut processing_steps)?;
        }

        // Step 6: t-test of the test column, original vs. cleaned
        self.report_progress(ProgressUpdate::new(
            CleaningStage::SignificanceTesting,
            0.9,
            "Running significance test...",
        ));
        info!(
            "Step 5: t-test on '{}' before vs. after cleaning...",
            test_column
        );
        let cleaned_values = numeric_values(&cleaned, &test_column)?;
        let t_test = ttest::students_t_test(&baseline, &cleaned_values)
            .context(format!("While testing '{}'", test_column))?;
        processing_steps.push(format!(
            "t-test on '{}': t = {:.4}, p = {:.4}",
            test_column, t_test.statistic, t_test.p_value
        ));

        let summary = CleaningSummary {
            duration_ms: start_time.elapsed().as_millis() as u64,
            rows_before,
            rows_after,
            rows_removed: rows_before - rows_after,
            missing_counts,
            imputations,
            filter_steps,
        };

        Ok(PipelineOutcome {
            cleaned,
            normalized,
            column_summaries,
            t_test,
            summary,
            processing_steps,
        })
    }

    #[cfg(feature = "plots")]
    fn render_plots(&self, cleaned: &DataFrame, processing_steps: &mut Vec<String>) -> Result<()> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let scatter_path = self.config.output_dir.join("scatter_matrix.png");
        crate::plot::scatter_matrix(cleaned, &scatter_path)?;
        processing_steps.push(format!("Rendered {}", scatter_path.display()));

        let box_path = self.config.output_dir.join("box_plot.png");
        crate::plot::box_plot(cleaned, &box_path)?;
        processing_steps.push(format!("Rendered {}", box_path.display()));

        Ok(())
    }

    #[cfg(not(feature = "plots"))]
    fn render_plots(&self, _cleaned: &DataFrame, _processing_steps: &mut Vec<String>) -> Result<()> {
        debug!("Plot rendering not compiled in; skipping");
        Ok(())
    }
}

/// Builder for [`Pipeline`] with fluent API.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Register a closure to receive progress updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(ClosureProgressReporter::arc(callback));
        self
    }

    /// Register a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
