//! The per-scan metadata container written next to each PLY.

use crate::error::DataError;
use crate::mat::MatFile;
use crate::types::PointCloud;
use glam::DMat3;
use std::path::Path;

/// Metadata for one exported scan.
///
/// Stored fields: `pc` (M×3 points), `name` (`{object}_{scan}`), `label`
/// (object id), `cat` (object name) and, for rotated test exports, `R`.
/// The rotation is metadata only; `pc` is never transformed by it.
#[derive(Debug, Clone, Copy)]
pub struct MetadataRecord<'a> {
    pub cloud: &'a PointCloud,
    pub name: &'a str,
    pub label: u32,
    pub category: &'a str,
    pub rotation: Option<DMat3>,
}

impl<'a> MetadataRecord<'a> {
    pub fn new(cloud: &'a PointCloud, name: &'a str, label: u32, category: &'a str) -> Self {
        Self {
            cloud,
            name,
            label,
            category,
            rotation: None,
        }
    }

    pub fn with_rotation(self, rotation: DMat3) -> Self {
        Self {
            rotation: Some(rotation),
            ..self
        }
    }

    pub fn to_mat_file(&self) -> MatFile {
        let mat = MatFile::new()
            .with_matrix("pc", self.cloud.len(), 3, self.cloud.to_column_major())
            .with_str("name", self.name)
            .with_int("label", i64::from(self.label))
            .with_str("cat", self.category);

        match self.rotation {
            Some(r) => mat.with_matrix("R", 3, 3, r.to_cols_array().to_vec()),
            None => mat,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DataError> {
        self.to_mat_file().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat::writer::tests::decode;
    use glam::DVec3;

    fn cloud() -> PointCloud {
        PointCloud::new(vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0)])
    }

    #[test]
    fn test_record_fields() {
        let cloud = cloud();
        let record = MetadataRecord::new(&cloud, "box_001", 3, "box");
        let mut bytes = Vec::new();
        record.to_mat_file().write_to(&mut bytes).unwrap();

        let vars = decode(&bytes);
        let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["pc", "name", "label", "cat"]);
        assert_eq!((vars[0].rows, vars[0].cols), (2, 3));
        assert_eq!(vars[0].f64s(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(vars[1].string(), "box_001");
        assert_eq!(vars[2].data, 3i64.to_le_bytes().to_vec());
        assert_eq!(vars[3].string(), "box");
    }

    #[test]
    fn test_rotated_record_stores_matrix_column_major() {
        let cloud = cloud();
        let r = DMat3::from_rotation_z(0.3);
        let record = MetadataRecord::new(&cloud, "box_001", 0, "box").with_rotation(r);
        let mut bytes = Vec::new();
        record.to_mat_file().write_to(&mut bytes).unwrap();

        let vars = decode(&bytes);
        assert_eq!(vars.len(), 5);
        let rot = &vars[4];
        assert_eq!(rot.name, "R");
        assert_eq!((rot.rows, rot.cols), (3, 3));
        let values = rot.f64s();
        // element (row 0, col 1) is -sin for a rotation about Z
        assert_eq!(values[3], r.y_axis.x);
        assert!(values[3] < 0.0);
        // the points are stored untouched
        assert_eq!(vars[0].f64s(), cloud.to_column_major());
    }

    #[test]
    fn test_save_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.mat");
        let cloud = cloud();
        MetadataRecord::new(&cloud, "box_001", 1, "box").save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decode(&bytes).len(), 4);
    }
}
