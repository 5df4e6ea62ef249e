//! Segmentation label map to hemisphere STL conversion.
//!
//! Library surface behind the `seg-stl` binary: output-path derivation and
//! the per-hemisphere mask-to-mesh pipeline. The binary adds argument
//! parsing and logging setup on top.
//!
//! # Pipeline
//!
//! Per hemisphere: label selection → optional downsample (with paired
//! spacing scale) → optional largest-component filter → marching cubes →
//! normalization (weld, degenerate removal, outward winding) → optional
//! Humphrey smoothing → optional uniform scale → STL export.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod paths;
pub mod pipeline;

pub use paths::{hemisphere_output_paths, nifti_base_name};
pub use pipeline::{convert_hemisphere, HemisphereReport, PipelineError, PipelineOptions};
