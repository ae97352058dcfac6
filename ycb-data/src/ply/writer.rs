//! ASCII PLY export for decimated scans.

use crate::error::DataError;
use crate::ply::VertexColor;
use glam::DVec3;
use serde::Serialize;
use serde_ply::{SerializeError, SerializeOptions};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Header emitted for a cloud with no points. serde-ply derives the property
/// declarations from the first row, so a zero-row element would lose them.
const EMPTY_HEADER: &str = "ply\n\
format ascii 1.0\n\
element vertex 0\n\
property float x\n\
property float y\n\
property float z\n\
property uchar red\n\
property uchar green\n\
property uchar blue\n\
end_header\n";

/// One `vertex` row. Field order and types define the header.
#[derive(Debug, Serialize)]
struct PlyRow {
    x: f32,
    y: f32,
    z: f32,
    red: u8,
    green: u8,
    blue: u8,
}

impl PlyRow {
    fn new(position: DVec3, color: VertexColor) -> Self {
        Self {
            x: position.x as f32,
            y: position.y as f32,
            z: position.z as f32,
            red: color.red,
            green: color.green,
            blue: color.blue,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlyCloud {
    vertex: Vec<PlyRow>,
}

/// Write `points` to `path` as ASCII PLY, every vertex colored `color`.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), points = points.len()))]
pub fn write_ply(path: impl AsRef<Path>, points: &[DVec3], color: VertexColor) -> Result<(), DataError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DataError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_ply_to(&mut writer, points, color).map_err(|e| DataError::io(path, e.0))?;
    writer.flush().map_err(|e| DataError::io(path, e))?;
    debug!("Wrote PLY with {} vertices", points.len());
    Ok(())
}

/// Write the PLY header and one `x y z red green blue` row per point.
pub fn write_ply_to<W: Write>(writer: &mut W, points: &[DVec3], color: VertexColor) -> Result<(), SerializeError> {
    if points.is_empty() {
        writer.write_all(EMPTY_HEADER.as_bytes())?;
        return Ok(());
    }

    let cloud = PlyCloud {
        vertex: points.iter().map(|&p| PlyRow::new(p, color)).collect(),
    };
    serde_ply::to_writer(&cloud, SerializeOptions::ascii(), writer)
}
