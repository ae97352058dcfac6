//! MAT-file (Level 5) export of scan metadata

mod record;
mod writer;

pub use record::MetadataRecord;
pub use writer::MatFile;
