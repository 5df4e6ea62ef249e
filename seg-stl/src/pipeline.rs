//! Per-hemisphere mask-to-mesh pipeline.

use std::path::{Path, PathBuf};

use mesh_extract::{extract_surface, ExtractError};
use mesh_repair::{normalize_mesh, NormalizeParams};
use mesh_smooth::{smooth_humphrey_iterations, HumphreyParams};
use thiserror::Error;
use tracing::{debug, info};
use volume_mask::{downsample_with_spacing, keep_largest_component, mask_from_labels, MaskError};
use volume_types::LabelVolume;

/// Errors from the conversion pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Mask operation failed (invalid downsample factor).
    #[error(transparent)]
    Mask(#[from] MaskError),

    /// Surface extraction failed (empty mask, degenerate grid).
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The mesh could not be written.
    #[error(transparent)]
    MeshIo(#[from] mesh_io::IoError),
}

/// Knobs shared by both hemisphere runs.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Stride factor for resolution reduction; 1 disables.
    pub downsample: u32,

    /// Whether to keep only the largest connected component.
    pub keep_largest: bool,

    /// Humphrey smoothing iterations; 0 disables.
    pub smooth_iterations: u32,

    /// Uniform geometry scale applied after extraction; 1.0 disables.
    pub scale: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            downsample: 1,
            keep_largest: true,
            smooth_iterations: 25,
            scale: 0.125,
        }
    }
}

/// What one hemisphere run produced.
#[derive(Debug, Clone)]
pub struct HemisphereReport {
    /// Path of the written STL.
    pub output: PathBuf,

    /// Vertex count of the exported mesh.
    pub vertices: usize,

    /// Face count of the exported mesh.
    pub faces: usize,

    /// Whether smoothing ran (false when iterations was 0).
    pub smoothing_applied: bool,

    /// Maximum vertex displacement caused by smoothing.
    pub smoothing_max_displacement: f64,
}

/// Run the full mask-to-mesh pipeline for one hemisphere.
///
/// Builds the label mask, optionally reduces resolution (scaling the
/// spacing in lockstep), optionally drops disconnected islands, extracts
/// the isosurface, normalizes the mesh, smooths, scales, and writes the
/// STL to `out_path`.
///
/// # Errors
///
/// Any failing stage aborts the run; an empty mask surfaces as
/// [`ExtractError::NoSurface`]. No partial output is written.
pub fn convert_hemisphere(
    volume: &LabelVolume,
    labels: &[i32],
    options: &PipelineOptions,
    out_path: &Path,
) -> Result<HemisphereReport, PipelineError> {
    debug!(?labels, out = %out_path.display(), "converting hemisphere");

    let mask = mask_from_labels(volume, labels);
    let (mut mask, spacing) =
        downsample_with_spacing(&mask, volume.spacing(), options.downsample)?;

    if options.keep_largest {
        mask = keep_largest_component(&mask);
    }

    let mut mesh = extract_surface(&mask, spacing)?;
    normalize_mesh(&mut mesh, &NormalizeParams::default());

    let mut smoothing_applied = false;
    let mut smoothing_max_displacement = 0.0;
    if options.smooth_iterations > 0 {
        let result =
            smooth_humphrey_iterations(&mesh, options.smooth_iterations, HumphreyParams::default());
        smoothing_applied = result.was_applied();
        smoothing_max_displacement = result.max_displacement;
        mesh = result.mesh;
    }

    if (options.scale - 1.0).abs() > f64::EPSILON {
        mesh.scale(options.scale);
    }

    mesh_io::save_mesh(&mesh, out_path)?;

    info!(
        out = %out_path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        smoothing_applied,
        "wrote hemisphere surface"
    );

    Ok(HemisphereReport {
        output: out_path.to_path_buf(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        smoothing_applied,
        smoothing_max_displacement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_tool_defaults() {
        let options = PipelineOptions::default();
        assert_eq!(options.downsample, 1);
        assert!(options.keep_largest);
        assert_eq!(options.smooth_iterations, 25);
        assert!((options.scale - 0.125).abs() < f64::EPSILON);
    }
}
