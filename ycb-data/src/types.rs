//! Core point cloud type shared by the readers, decimator and exporters.

use glam::DVec3;

/// An ordered set of 3D points from a single scan.
///
/// Coordinates are stored in double precision, matching the text scans
/// they are parsed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub points: Vec<DVec3>,
}

impl PointCloud {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keep every `stride`-th point, starting at the first.
    pub fn decimated(&self, stride: usize) -> Self {
        Self::new(crate::decimate::decimate(&self.points, stride))
    }

    /// Flatten into an M×3 column-major buffer: all x, then all y, then all z.
    pub fn to_column_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.points.len() * 3);
        out.extend(self.points.iter().map(|p| p.x));
        out.extend(self.points.iter().map(|p| p.y));
        out.extend(self.points.iter().map(|p| p.z));
        out
    }
}
