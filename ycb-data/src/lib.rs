//! YCB Data Crate
//!
//! Leaf components for turning raw per-object scans into model-ready files:
//! XYZ scan parsing, fixed-stride decimation, train/test partitioning,
//! random rotation generation, and the PLY and MAT exporters.
//! Nothing in here touches directory layout; that lives in `ycb-pipeline`.

pub mod decimate;
pub mod error;
pub mod mat;
pub mod ply;
pub mod rotation;
pub mod split;
pub mod types;
pub mod xyz;

pub use decimate::{DEFAULT_STRIDE, decimate};
pub use error::DataError;
pub use mat::{MatFile, MetadataRecord};
pub use ply::{PlyVertex, VertexColor, load_vertices_from_ply, write_ply, write_ply_to};
pub use rotation::random_rotation;
pub use split::{DEFAULT_TRAIN_PERCENT, SplitAssignment, partition};
pub use types::PointCloud;
pub use xyz::{load_points_from_xyz, parse_xyz};
