//! Mesh normalization for freshly extracted surfaces.
//!
//! Marching-cubes output is structurally sound but benefits from the same
//! normalization any imported mesh gets before export:
//!
//! - [`weld_vertices`] - Merge positionally duplicate vertices
//! - [`remove_degenerate_triangles`] - Drop zero-area faces
//! - [`remove_unreferenced_vertices`] - Compact the vertex array
//! - [`orient_outward`] - Flip winding if the closed surface is inside-out
//! - [`normalize_mesh`] - All of the above in order, with a summary
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_repair::{normalize_mesh, NormalizeParams};
//!
//! let mut cube = unit_cube();
//! cube.flip_normals();
//!
//! let summary = normalize_mesh(&mut cube, &NormalizeParams::default());
//! assert!(summary.flipped_winding);
//! assert!(cube.signed_volume() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod repair;

pub use repair::{
    normalize_mesh, orient_outward, remove_degenerate_triangles, remove_unreferenced_vertices,
    weld_vertices, NormalizeParams, NormalizeSummary,
};
