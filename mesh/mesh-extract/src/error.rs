//! Error types for surface extraction.

use thiserror::Error;

/// Result type for surface extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur during isosurface extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The mask has no inside/outside transition, so no isosurface exists.
    ///
    /// Raised for all-false masks (nothing selected, e.g. a label set that
    /// matched no voxels) and all-true masks alike.
    #[error("mask has no isosurface crossing ({true_count} of {total} voxels set)")]
    NoSurface {
        /// Number of true voxels in the mask.
        true_count: usize,
        /// Total number of voxels in the mask.
        total: usize,
    },

    /// The grid is too small to contain a marching-cubes cell.
    #[error("grid {dims:?} is too small for surface extraction (every axis must be >= 2)")]
    GridTooSmall {
        /// The offending grid dimensions.
        dims: (usize, usize, usize),
    },
}
