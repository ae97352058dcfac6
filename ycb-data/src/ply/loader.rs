//! PLY file loading, used to check exported geometry.

use crate::error::DataError;
use crate::ply::{PlyVertex, VertexColor};
use glam::DVec3;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

// serde_ply needs rows as maps to accept files with arbitrary vertex properties
#[derive(Deserialize, Debug)]
struct PlyFile {
    #[serde(rename = "vertex")]
    vertex: Vec<HashMap<String, JsonValue>>,
}

/// Load vertex positions and colors from a PLY file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_vertices_from_ply(path: impl AsRef<Path>) -> Result<Vec<PlyVertex>, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let reader = BufReader::new(file);

    let ply_error = |message: String| DataError::Ply {
        path: path.to_path_buf(),
        message,
    };

    let ply_data: PlyFile = serde_ply::from_reader(reader).map_err(|e| {
        warn!("Failed to parse PLY file: {}", e);
        ply_error(e.to_string())
    })?;

    fn get_f64(prop: Option<&JsonValue>) -> Option<f64> {
        prop.and_then(JsonValue::as_f64)
    }

    fn get_u8(prop: Option<&JsonValue>) -> Option<u8> {
        prop.and_then(JsonValue::as_u64).and_then(|u| u8::try_from(u).ok())
    }

    let mut vertices = Vec::with_capacity(ply_data.vertex.len());
    for (i, vertex) in ply_data.vertex.iter().enumerate() {
        let coord = |name: &str| get_f64(vertex.get(name)).ok_or_else(|| ply_error(format!("Missing '{}' at vertex {}", name, i)));
        let position = DVec3::new(coord("x")?, coord("y")?, coord("z")?);

        let color = match (
            get_u8(vertex.get("red")),
            get_u8(vertex.get("green")),
            get_u8(vertex.get("blue")),
        ) {
            (Some(r), Some(g), Some(b)) => VertexColor::new(r, g, b),
            _ => VertexColor::WHITE,
        };

        vertices.push(PlyVertex { position, color });
    }

    debug!("Loaded {} vertices from PLY file", vertices.len());
    Ok(vertices)
}
