//! Marching-cubes isosurface extraction from binary voxel masks.
//!
//! Turns a [`volume_types::VoxelMask`] plus its physical voxel spacing into
//! an [`mesh_types::IndexedMesh`]. The mask is sampled at voxel centers as
//! a 0/1 field and the surface is extracted at the midpoint isovalue 0.5,
//! the correct threshold for a binary occupancy field. Vertices land on
//! grid-edge midpoints, scaled into millimeters by the spacing.
//!
//! Shared edge vertices are reused across cells, so the output arrives
//! index-welded. Zero-area triangles are never emitted.
//!
//! A mask with no inside/outside transition (all true or all false) has no
//! isosurface; extraction refuses it with [`ExtractError::NoSurface`]
//! rather than returning an empty mesh.
//!
//! # Example
//!
//! ```
//! use volume_types::{VoxelMask, VoxelSpacing};
//! use mesh_extract::extract_surface;
//!
//! let mut mask = VoxelMask::new((4, 4, 4));
//! mask.set(1, 1, 1, true);
//!
//! let mesh = extract_surface(&mask, VoxelSpacing::isotropic(1.0)).unwrap();
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod extract;
mod tables;

pub use error::{ExtractError, ExtractResult};
pub use extract::extract_surface;
