//! Pipeline configuration.

use crate::error::PipelineError;
use std::path::PathBuf;
pub use ycb_data::{DEFAULT_STRIDE, DEFAULT_TRAIN_PERCENT};

/// Maximum number of objects that receive an id.
pub const MAX_OBJECTS: usize = 40;

/// Extension of raw scan files.
pub const SCAN_EXTENSION: &str = "xyz";

/// Extension of exported geometry files.
pub const GEOMETRY_EXTENSION: &str = "ply";

/// Extension of exported metadata files.
pub const METADATA_EXTENSION: &str = "mat";

/// Input subdirectory of each object that holds its scans.
pub const SCAN_DIR: &str = "test";

pub const TRAIN_DIR: &str = "train";
pub const TEST_DIR: &str = "test";
pub const ROTATED_TEST_DIR: &str = "testR";

/// Settings for one dataset run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub max_objects: usize,
    pub decimation_stride: usize,
    pub train_percent: u32,
    pub scan_extension: String,
    /// Seed for the shuffle and rotation draws; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Log and skip scans that fail to parse instead of aborting.
    pub skip_malformed: bool,
}

impl PipelineConfig {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    pub fn with_decimation_stride(mut self, stride: usize) -> Self {
        self.decimation_stride = stride;
        self
    }

    pub fn with_train_percent(mut self, percent: u32) -> Self {
        self.train_percent = percent;
        self
    }

    pub fn with_scan_extension(mut self, extension: impl Into<String>) -> Self {
        self.scan_extension = extension.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.decimation_stride == 0 {
            return Err(PipelineError::InvalidConfig(
                "decimation stride must be at least 1".to_string(),
            ));
        }
        if self.train_percent > 100 {
            return Err(PipelineError::InvalidConfig(format!(
                "train percent must be within 0..=100, got {}",
                self.train_percent
            )));
        }
        if self.scan_extension.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "scan extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::new(),
            output_root: PathBuf::new(),
            max_objects: MAX_OBJECTS,
            decimation_stride: DEFAULT_STRIDE,
            train_percent: DEFAULT_TRAIN_PERCENT,
            scan_extension: SCAN_EXTENSION.to_string(),
            seed: None,
            skip_malformed: false,
        }
    }
}
