//! Error types for the command line front end.

use std::path::PathBuf;
use thiserror::Error;
use ycb_pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input directory not found: {0}")]
    MissingInput(PathBuf),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
