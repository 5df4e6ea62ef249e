//! Error types for NIfTI label-map I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for NIfTI label-map I/O.
pub type NiftiIoResult<T> = Result<T, NiftiIoError>;

/// Errors that can occur while reading or writing label maps.
#[derive(Debug, Error)]
pub enum NiftiIoError {
    /// The input file could not be read from disk.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The stream is not a valid NIfTI-1 file.
    #[error("invalid NIfTI data: {0}")]
    Format(#[from] nifti::NiftiError),

    /// The file does not describe a 3D volume.
    #[error("expected a 3D label map, got a {ndim}D image")]
    NotVolumetric {
        /// Number of non-singleton dimensions in the header.
        ndim: usize,
    },

    /// A label code does not fit the on-disk integer type.
    #[error("label {label} does not fit INT16 storage")]
    LabelRange {
        /// The out-of-range label.
        label: i32,
    },
}
