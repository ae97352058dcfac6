//! Synthetic dataset example
//!
//! Generates a few objects of random-looking sphere scans in a temporary
//! directory, runs the pipeline over them and prints the resulting layout.
//!
//! Usage:
//!   cargo run -p ycb-pipeline --example synthetic_dataset -- [output_dir]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use ycb_pipeline::{DatasetPipeline, PipelineConfig};

fn write_sphere_scan(path: &Path, points: usize, radius: f64) -> std::io::Result<()> {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    let body: String = (0..points)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / points as f64;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f64;
            format!(
                "{} {} {}\n",
                radius * r * theta.cos(),
                radius * y,
                radius * r * theta.sin()
            )
        })
        .collect();
    fs::write(path, body)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let input = tempfile::tempdir()?;
    let output: PathBuf = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::temp_dir().join("ycb40-synthetic"),
    };

    for (object, radius) in [("apple", 0.04), ("ball", 0.1), ("can", 0.06)] {
        let scan_dir = input.path().join(object).join("test");
        fs::create_dir_all(&scan_dir)?;
        for scan in 0..10 {
            write_sphere_scan(&scan_dir.join(format!("{object}_{scan}.xyz")), 400, radius)?;
        }
    }

    let config = PipelineConfig::new(input.path(), &output).with_seed(Some(2024));
    let summary = DatasetPipeline::new(config)?.run()?;

    for object in &summary.objects {
        info!(
            "{:>2} {:<8} train={} test={}",
            object.id, object.name, object.train, object.test
        );
    }
    info!("Dataset written to {}", output.display());
    Ok(())
}
