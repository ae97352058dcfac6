//! XYZ text scan loading

mod loader;

pub use loader::{load_points_from_xyz, parse_xyz};
