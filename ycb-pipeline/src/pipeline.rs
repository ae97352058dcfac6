//! The dataset orchestrator: discovery → partition → decimate → export.

use crate::config::{
    GEOMETRY_EXTENSION, METADATA_EXTENSION, PipelineConfig, ROTATED_TEST_DIR, SCAN_DIR, TEST_DIR,
    TRAIN_DIR,
};
use crate::discover::{ObjectEntry, ScanEntry, collect_scans, discover_objects};
use crate::error::PipelineError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use ycb_data::{
    MetadataRecord, PointCloud, VertexColor, load_points_from_xyz, partition, random_rotation,
    write_ply,
};

/// Which subset a scan is exported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subset {
    Train,
    Test,
}

/// Output directories for one object.
struct ObjectDirs {
    train: PathBuf,
    test: PathBuf,
    test_rotated: PathBuf,
}

impl ObjectDirs {
    fn create(output_root: &Path, object: &str) -> Result<Self, PipelineError> {
        let base = output_root.join(object);
        let dirs = Self {
            train: base.join(TRAIN_DIR),
            test: base.join(TEST_DIR),
            test_rotated: base.join(ROTATED_TEST_DIR),
        };
        for dir in [&dirs.train, &dirs.test, &dirs.test_rotated] {
            fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
        }
        Ok(dirs)
    }
}

/// Per-object outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub name: String,
    pub id: u32,
    pub train: usize,
    pub test: usize,
    /// The object had no scan directory; only its output folders were created.
    pub missing_scan_dir: bool,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub objects: Vec<ObjectSummary>,
    /// Object directories beyond the object cap.
    pub skipped_objects: Vec<String>,
    /// Scans that failed to parse and were skipped (only with `skip_malformed`).
    pub skipped_scans: Vec<PathBuf>,
}

impl RunSummary {
    pub fn train_scans(&self) -> usize {
        self.objects.iter().map(|o| o.train).sum()
    }

    pub fn test_scans(&self) -> usize {
        self.objects.iter().map(|o| o.test).sum()
    }
}

/// Converts an input scan tree into the `train` / `test` / `testR` layout.
///
/// All randomness (shuffles and rotation angles) is drawn from one
/// [`StdRng`], so a seeded pipeline reproduces its output exactly.
pub struct DatasetPipeline {
    config: PipelineConfig,
    rng: StdRng,
}

impl DatasetPipeline {
    /// Build a pipeline, seeding from `config.seed` or the OS.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Build a pipeline that draws from the given generator.
    pub fn with_rng(config: PipelineConfig, rng: StdRng) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Process every discovered object in id order.
    ///
    /// Output written before a failure stays on disk.
    #[tracing::instrument(skip_all, fields(input = %self.config.input_root.display()))]
    pub fn run(&mut self) -> Result<RunSummary, PipelineError> {
        let output_root = &self.config.output_root;
        fs::create_dir_all(output_root).map_err(|e| PipelineError::io(output_root, e))?;

        let discovery = discover_objects(&self.config.input_root, self.config.max_objects)?;
        info!(
            "Discovered {} objects ({} over the cap of {})",
            discovery.objects.len(),
            discovery.skipped.len(),
            self.config.max_objects
        );

        let mut summary = RunSummary {
            skipped_objects: discovery.skipped,
            ..RunSummary::default()
        };

        for object in &discovery.objects {
            let object_summary = self.process_object(object, &mut summary.skipped_scans)?;
            summary.objects.push(object_summary);
        }

        info!(
            "Exported {} train and {} test scans for {} objects",
            summary.train_scans(),
            summary.test_scans(),
            summary.objects.len()
        );
        Ok(summary)
    }

    #[tracing::instrument(skip_all, fields(object = %object.name, id = object.id))]
    fn process_object(
        &mut self,
        object: &ObjectEntry,
        skipped_scans: &mut Vec<PathBuf>,
    ) -> Result<ObjectSummary, PipelineError> {
        let dirs = ObjectDirs::create(&self.config.output_root, &object.name)?;
        let mut object_summary = ObjectSummary {
            name: object.name.clone(),
            id: object.id,
            train: 0,
            test: 0,
            missing_scan_dir: false,
        };

        let scan_dir = object.path.join(SCAN_DIR);
        let Some(scans) = collect_scans(&scan_dir, &self.config.scan_extension)? else {
            debug!("No scan directory at {}, skipping export", scan_dir.display());
            object_summary.missing_scan_dir = true;
            return Ok(object_summary);
        };

        let split = partition(scans, self.config.train_percent, &mut self.rng);
        debug!("Split {} scans into {} train / {} test", split.len(), split.train.len(), split.test.len());

        for scan in &split.train {
            if self.export_scan(object, scan, Subset::Train, &dirs, skipped_scans)? {
                object_summary.train += 1;
            }
        }
        for scan in &split.test {
            if self.export_scan(object, scan, Subset::Test, &dirs, skipped_scans)? {
                object_summary.test += 1;
            }
        }

        info!(
            "Object {} ({}): {} train, {} test",
            object.name, object.id, object_summary.train, object_summary.test
        );
        Ok(object_summary)
    }

    /// Export one scan. Returns `false` if it was skipped as malformed.
    fn export_scan(
        &mut self,
        object: &ObjectEntry,
        scan: &ScanEntry,
        subset: Subset,
        dirs: &ObjectDirs,
        skipped_scans: &mut Vec<PathBuf>,
    ) -> Result<bool, PipelineError> {
        let points = match load_points_from_xyz(&scan.path) {
            Ok(points) => points,
            Err(e) if self.config.skip_malformed && e.is_malformed_input() => {
                warn!("Skipping malformed scan: {}", e);
                skipped_scans.push(scan.path.clone());
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let cloud = PointCloud::new(points).decimated(self.config.decimation_stride);
        let name = format!("{}_{}", object.name, scan.scan_id);
        let out_dir = match subset {
            Subset::Train => &dirs.train,
            Subset::Test => &dirs.test,
        };

        write_ply(
            out_dir.join(format!("{name}.{GEOMETRY_EXTENSION}")),
            &cloud.points,
            VertexColor::WHITE,
        )?;

        let record = MetadataRecord::new(&cloud, &name, object.id, &object.name);
        let mat_file = format!("{name}.{METADATA_EXTENSION}");
        record.save(out_dir.join(&mat_file))?;

        if subset == Subset::Test {
            let rotation = random_rotation(&mut self.rng);
            record.with_rotation(rotation).save(dirs.test_rotated.join(&mat_file))?;
        }

        debug!("Exported {} ({} points) to {:?}", name, cloud.len(), subset);
        Ok(true)
    }
}
