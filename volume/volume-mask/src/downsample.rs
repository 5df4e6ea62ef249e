//! Strided resolution reduction.

use volume_types::{VoxelMask, VoxelSpacing};

use crate::error::{MaskError, MaskResult};

/// Downsample a mask by keeping every `factor`-th voxel along each axis.
///
/// This is nearest-neighbor subsampling with no averaging: output voxel
/// `(x, y, z)` equals source voxel `(x*factor, y*factor, z*factor)`. The
/// output shape is `ceil(n / factor)` per axis. It is intentionally crude,
/// trading surface detail for mesh size.
///
/// A factor of 1 returns the mask unchanged. The caller must scale the
/// voxel spacing by the same factor; prefer [`downsample_with_spacing`],
/// which keeps the two in lockstep.
///
/// # Errors
///
/// Returns [`MaskError::InvalidFactor`] if `factor` is 0.
///
/// # Example
///
/// ```
/// use volume_types::VoxelMask;
/// use volume_mask::downsample;
///
/// let mut mask = VoxelMask::new((5, 5, 5));
/// mask.set(2, 2, 2, true);
///
/// let coarse = downsample(&mask, 2).unwrap();
/// assert_eq!(coarse.dims(), (3, 3, 3));
/// assert_eq!(coarse.get(1, 1, 1), Some(true));
/// ```
pub fn downsample(mask: &VoxelMask, factor: u32) -> MaskResult<VoxelMask> {
    if factor == 0 {
        return Err(MaskError::InvalidFactor { factor });
    }
    if factor == 1 {
        return Ok(mask.clone());
    }

    let f = factor as usize;
    let (nx, ny, nz) = mask.dims();
    let out_dims = (nx.div_ceil(f), ny.div_ceil(f), nz.div_ceil(f));

    let mut out = VoxelMask::new(out_dims);
    for z in 0..out_dims.2 {
        for y in 0..out_dims.1 {
            for x in 0..out_dims.0 {
                if mask.get(x * f, y * f, z * f) == Some(true) {
                    out.set(x, y, z, true);
                }
            }
        }
    }

    tracing::debug!(
        factor,
        from = ?mask.dims(),
        to = ?out.dims(),
        "downsampled mask"
    );

    Ok(out)
}

/// Downsample a mask and scale its voxel spacing by the same factor.
///
/// This enforces the invariant that spacing always describes the grid
/// handed to surface extraction: a factor-f stride through the voxels means
/// each remaining voxel covers f times the physical distance per axis.
///
/// # Errors
///
/// Returns [`MaskError::InvalidFactor`] if `factor` is 0.
pub fn downsample_with_spacing(
    mask: &VoxelMask,
    spacing: VoxelSpacing,
    factor: u32,
) -> MaskResult<(VoxelMask, VoxelSpacing)> {
    let reduced = downsample(mask, factor)?;
    Ok((reduced, spacing.scaled(factor)))
}
