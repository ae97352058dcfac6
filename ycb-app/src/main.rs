//! YCB40 dataset builder
//!
//! Converts raw per-object XYZ scans into a train/test/testR dataset of
//! PLY geometry and MAT metadata files.

mod errors;

use clap::Parser;
use errors::AppError;
use std::path::PathBuf;
use tracing::{info, warn};
use ycb_pipeline::config::{DEFAULT_STRIDE, DEFAULT_TRAIN_PERCENT, MAX_OBJECTS};
use ycb_pipeline::{DatasetPipeline, PipelineConfig};

/// YCB40 - build a point cloud dataset from raw object scans
#[derive(Parser, Debug)]
#[command(name = "ycb40")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input root containing `<object>/test/<scan>.xyz`
    #[arg(short, long)]
    input: PathBuf,

    /// Output root for `<object>/{train,test,testR}`
    #[arg(short, long)]
    output: PathBuf,

    /// Number of objects that receive an id; the rest are skipped
    #[arg(long, default_value_t = MAX_OBJECTS)]
    max_objects: usize,

    /// Keep every n-th point of each scan
    #[arg(long, default_value_t = DEFAULT_STRIDE)]
    stride: usize,

    /// Percentage of each object's scans used for training
    #[arg(long, default_value_t = DEFAULT_TRAIN_PERCENT)]
    train_percent: u32,

    /// Seed for the split and rotations (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip scans that fail to parse instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), AppError> {
    if !args.input.is_dir() {
        return Err(AppError::MissingInput(args.input));
    }

    let config = PipelineConfig::new(args.input, args.output)
        .with_max_objects(args.max_objects)
        .with_decimation_stride(args.stride)
        .with_train_percent(args.train_percent)
        .with_seed(args.seed)
        .with_skip_malformed(args.skip_malformed);

    let mut pipeline = DatasetPipeline::new(config)?;
    let summary = pipeline.run()?;

    info!(
        "Done: {} objects, {} train / {} test scans",
        summary.objects.len(),
        summary.train_scans(),
        summary.test_scans()
    );
    if !summary.skipped_objects.is_empty() {
        info!("{} objects over the cap were skipped", summary.skipped_objects.len());
    }
    for path in &summary.skipped_scans {
        warn!("Skipped malformed scan {}", path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(args) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
