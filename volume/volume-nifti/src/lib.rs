//! NIfTI-1 I/O for integer label maps.
//!
//! Loading goes through the `nifti` crate and keeps label codes exact: no
//! resampling, no interpolation, no implicit rescaling of integer classes.
//! Both `.nii` and `.nii.gz` are supported; gzip is detected from the
//! stream's magic bytes rather than the file name.
//!
//! The crate also carries a minimal NIfTI-1 writer ([`save_label_volume`])
//! so tests and tools can produce synthetic label maps without a second
//! dependency stack.
//!
//! # Example
//!
//! ```no_run
//! use volume_nifti::load_label_volume;
//!
//! let volume = load_label_volume("seg.nii.gz").unwrap();
//! let (nx, ny, nz) = volume.dims();
//! println!("{nx}x{ny}x{nz} @ {:?} mm", volume.spacing());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod read;
mod write;

pub use error::{NiftiIoError, NiftiIoResult};
pub use read::load_label_volume;
pub use write::save_label_volume;
