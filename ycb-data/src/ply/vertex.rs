//! PLY vertex data structures

use glam::DVec3;

/// 8-bit RGB color written alongside every exported vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl VertexColor {
    /// Placeholder color for scans that carry no color information.
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Default for VertexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Vertex read back from a PLY file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlyVertex {
    pub position: DVec3,
    pub color: VertexColor,
}
