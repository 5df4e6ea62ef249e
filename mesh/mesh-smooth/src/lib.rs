//! Humphrey (HC) mesh smoothing.
//!
//! Iterative Laplacian-style vertex averaging with the Humphrey Classes
//! correction pass (Vollmer, Mencl, Müller 1999), which pushes vertices
//! back toward a blend of their original and previous positions to resist
//! the shrinkage of plain Laplacian smoothing.
//!
//! Whether smoothing ran, and how far vertices moved, is always reported
//! through [`HumphreyResult`]; there is no silent no-op path.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_smooth::{smooth_humphrey_iterations, HumphreyParams};
//!
//! let cube = unit_cube();
//! let result = smooth_humphrey_iterations(&cube, 5, HumphreyParams::default());
//! assert_eq!(result.iterations_performed, 5);
//! assert!(result.was_applied());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod humphrey;

pub use humphrey::{smooth_humphrey_iterations, HumphreyParams, HumphreyResult};
