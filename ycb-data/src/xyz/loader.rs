//! XYZ scan parsing: one `x y z` triple per line.

use crate::error::DataError;
use glam::DVec3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Load all points from an XYZ scan file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_points_from_xyz(path: impl AsRef<Path>) -> Result<Vec<DVec3>, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let points = parse_xyz(BufReader::new(file), path)?;
    debug!("Loaded {} points", points.len());
    Ok(points)
}

/// Parse XYZ text from any reader. `path` is only used for error messages.
///
/// Blank lines and `#` comments are skipped; every other line must hold
/// exactly three numbers. Lines that are not valid UTF-8 are malformed input,
/// not I/O failures.
pub fn parse_xyz<R: BufRead>(reader: R, path: &Path) -> Result<Vec<DVec3>, DataError> {
    let mut points = Vec::new();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|e| DataError::io(path, e))?;
        let line_number = index + 1;
        let malformed = |message: String| DataError::Parse {
            path: path.to_path_buf(),
            line: line_number,
            message,
        };

        let line = std::str::from_utf8(&bytes).map_err(|e| malformed(format!("invalid UTF-8: {}", e)))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(malformed(format!("expected 3 columns, found {}", tokens.len())));
        }

        let mut coords = [0.0f64; 3];
        for (slot, token) in coords.iter_mut().zip(&tokens) {
            *slot = token
                .parse::<f64>()
                .map_err(|e| malformed(format!("invalid number '{}': {}", token, e)))?;
        }
        points.push(DVec3::from_array(coords));
    }

    Ok(points)
}
