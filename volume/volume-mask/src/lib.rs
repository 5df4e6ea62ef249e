//! Boolean mask operations on label volumes.
//!
//! This crate turns a [`volume_types::LabelVolume`] into the boolean
//! occupancy masks that drive surface extraction:
//!
//! - [`mask_from_labels`] - Select voxels whose label is in a given set
//! - [`downsample`] / [`downsample_with_spacing`] - Strided resolution
//!   reduction, paired with the matching spacing scale
//! - [`keep_largest_component`] - Drop all but the largest 6-connected
//!   region
//!
//! # Example
//!
//! ```
//! use volume_types::{LabelVolume, VoxelSpacing};
//! use volume_mask::{mask_from_labels, keep_largest_component};
//!
//! let mut volume = LabelVolume::new((4, 4, 4), VoxelSpacing::isotropic(1.0));
//! volume.set(1, 1, 1, 3);
//! volume.set(3, 3, 3, 2);
//!
//! let mask = mask_from_labels(&volume, &[2, 3]);
//! assert_eq!(mask.count_true(), 2);
//!
//! // The two voxels are not face-adjacent; only one survives.
//! let largest = keep_largest_component(&mask);
//! assert_eq!(largest.count_true(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod components;
mod downsample;
mod error;
mod labels;

pub use components::{find_components, keep_largest_component, ComponentLabels};
pub use downsample::{downsample, downsample_with_spacing};
pub use error::{MaskError, MaskResult};
pub use labels::mask_from_labels;
