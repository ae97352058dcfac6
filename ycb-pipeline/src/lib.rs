//! YCB Pipeline Crate
//!
//! Turns an input tree of `<object>/test/<scan>.xyz` files into the
//! `train` / `test` / `testR` dataset layout.
//!
//! ## Modules
//!
//! - [`config`]: Run configuration and fixed layout constants
//! - [`discover`]: Object and scan discovery with sorted, capped id assignment
//! - [`pipeline`]: The orchestrator that splits, decimates and exports every scan

pub mod config;
pub mod discover;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use discover::{ObjectEntry, discover_objects};
pub use error::PipelineError;
pub use pipeline::{DatasetPipeline, ObjectSummary, RunSummary};
