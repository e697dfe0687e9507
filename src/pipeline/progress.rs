//! Progress reporting for the cleaning pipeline.
//!
//! The pipeline itself never prints; stage transitions surface through the
//! [`ProgressReporter`] trait so the CLI (or any other host) decides what to
//! do with them. Execution is strictly sequential, so there is no
//! cancellation machinery.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Pipeline is starting and recording the baseline state
    Initializing,
    /// Filling missing values with column means
    Imputation,
    /// Removing outlier rows via the IQR cascade
    OutlierFiltering,
    /// Computing descriptive statistics
    Summarizing,
    /// Min-max rescaling
    Normalizing,
    /// Rendering the scatter matrix and box plot
    Rendering,
    /// Running the before/after t-test
    SignificanceTesting,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Imputation => "Imputing Values",
            Self::OutlierFiltering => "Filtering Outliers",
            Self::Summarizing => "Summarizing",
            Self::Normalizing => "Normalizing",
            Self::Rendering => "Rendering Plots",
            Self::SignificanceTesting => "Testing Significance",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }
}

/// A progress update emitted at stage boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: CleaningStage,
    /// Overall progress (0.0 - 1.0)
    pub progress: f32,
    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update.
    pub fn new(stage: CleaningStage, progress: f32, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Complete, 1.0, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Failed,
            progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates during cleaning.
///
/// Implementations must be `Send + Sync` so a host can hand the pipeline to
/// a worker thread while observing it from elsewhere.
pub trait ProgressReporter: Send + Sync {
    /// Called at each stage boundary.
    fn report(&self, update: ProgressUpdate);
}

/// A [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Wrap a closure as a progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }

    /// Wrap a closure as a shared trait object.
    pub fn arc(callback: F) -> Arc<dyn ProgressReporter>
    where
        F: 'static,
    {
        Arc::new(Self::new(callback))
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}
