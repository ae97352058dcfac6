//! Error types for scan reading and export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading scans or writing export files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scan {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("PLY parsing error in {path}: {message}")]
    Ply { path: PathBuf, message: String },
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DataError::Io { path, .. } | DataError::Parse { path, .. } | DataError::Ply { path, .. } => path,
        }
    }

    /// Whether the error came from scan content rather than the filesystem.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, DataError::Parse { .. })
    }
}
