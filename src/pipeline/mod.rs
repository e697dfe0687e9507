//! Pipeline module.
//!
//! This module provides the main cleaning pipeline and its progress
//! reporting seam.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
