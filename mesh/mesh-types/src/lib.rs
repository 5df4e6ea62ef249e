//! Core triangle-mesh types.
//!
//! This crate provides the mesh representation shared by the surface side
//! of the pipeline:
//!
//! - [`IndexedMesh`] - Triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units and Coordinates
//!
//! Coordinates are `f64` millimeters in a right-handed system. Face
//! winding is counter-clockwise when viewed from outside, so normals point
//! outward by the right-hand rule and a closed, correctly wound mesh has
//! positive signed volume.
//!
//! # Example
//!
//! ```
//! use mesh_types::IndexedMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use mesh::{unit_cube, IndexedMesh};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
