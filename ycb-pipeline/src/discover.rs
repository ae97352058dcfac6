//! Object and scan discovery.
//!
//! Directory listings are sorted by name before ids are assigned, so the
//! object cap and the id of every object are the same on every platform.

use crate::error::PipelineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An object category that was assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub name: String,
    pub id: u32,
    pub path: PathBuf,
}

/// One raw scan file of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// File name without its extension.
    pub scan_id: String,
    pub path: PathBuf,
}

/// Result of listing the input root.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Objects in id order, at most `max_objects` of them.
    pub objects: Vec<ObjectEntry>,
    /// Object directories left out because the cap was reached.
    pub skipped: Vec<String>,
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<(String, PathBuf)>, PipelineError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))? {
        let entry = entry.map_err(|e| PipelineError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// List the object directories under `input_root` and number them from 0.
///
/// Plain files are ignored and do not consume an id. Directories beyond
/// `max_objects` are reported in [`Discovery::skipped`] rather than failing.
pub fn discover_objects(input_root: &Path, max_objects: usize) -> Result<Discovery, PipelineError> {
    let mut discovery = Discovery::default();

    for (name, path) in read_dir_sorted(input_root)? {
        if !path.is_dir() {
            continue;
        }
        if discovery.objects.len() >= max_objects {
            debug!("Object cap of {} reached, skipping {}", max_objects, name);
            discovery.skipped.push(name);
            continue;
        }
        let id = discovery.objects.len() as u32;
        discovery.objects.push(ObjectEntry { name, id, path });
    }

    Ok(discovery)
}

/// Collect the scan files with `extension` in `scan_dir`, sorted by name.
///
/// Returns `None` when the directory does not exist.
pub fn collect_scans(scan_dir: &Path, extension: &str) -> Result<Option<Vec<ScanEntry>>, PipelineError> {
    if !scan_dir.is_dir() {
        return Ok(None);
    }

    let scans = read_dir_sorted(scan_dir)?
        .into_iter()
        .filter(|(_, path)| path.is_file() && path.extension().is_some_and(|ext| ext == extension))
        .filter_map(|(_, path)| {
            let scan_id = path.file_stem()?.to_string_lossy().into_owned();
            Some(ScanEntry { scan_id, path })
        })
        .collect();

    Ok(Some(scans))
}
