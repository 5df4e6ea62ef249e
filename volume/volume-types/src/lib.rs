//! Core voxel-grid types for segmentation-to-surface pipelines.
//!
//! This crate provides the foundational types shared by the volume side of
//! the pipeline:
//!
//! - [`LabelVolume`] - A 3D grid of integer anatomical label codes
//! - [`VoxelMask`] - A 3D boolean occupancy grid
//! - [`VoxelSpacing`] - Physical voxel size in millimeters per axis
//!
//! # Memory Layout
//!
//! All grids use a flat buffer with x varying fastest (Fortran order),
//! `index = x + y*nx + z*nx*ny`, matching the NIfTI on-disk convention so
//! that loaded volumes never need reordering.
//!
//! # Units
//!
//! Grid indices are voxel coordinates; [`VoxelSpacing`] converts them to
//! millimeters. Downstream mesh crates work in millimeters.
//!
//! # Example
//!
//! ```
//! use volume_types::{LabelVolume, VoxelMask, VoxelSpacing};
//!
//! let mut volume = LabelVolume::new((4, 4, 4), VoxelSpacing::isotropic(1.0));
//! volume.set(1, 1, 1, 3);
//!
//! let mut mask = VoxelMask::new((4, 4, 4));
//! mask.set(1, 1, 1, true);
//! assert_eq!(mask.count_true(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mask;
mod spacing;
mod volume;

pub use mask::VoxelMask;
pub use spacing::VoxelSpacing;
pub use volume::LabelVolume;
