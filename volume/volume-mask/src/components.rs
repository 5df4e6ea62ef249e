//! Connected-component analysis on voxel masks.
//!
//! Components are maximal sets of true voxels reachable through face
//! adjacency (6-connectivity). Labeling visits voxels in scan order
//! (x fastest), so component IDs are deterministic for a given mask.

use volume_types::VoxelMask;

/// Per-voxel component labels for a mask.
///
/// Label 0 is background (false voxels); true voxels carry labels starting
/// at 1, assigned in scan order of each component's seed voxel.
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    /// Component label per voxel, same layout as the mask buffer.
    pub labels: Vec<u32>,
    /// Voxel count per component; `sizes[i]` is the size of label `i + 1`.
    pub sizes: Vec<usize>,
}

impl ComponentLabels {
    /// Number of connected components found.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Label of the largest component, or `None` for an all-false mask.
    ///
    /// Ties are broken deterministically: the earliest-labeled component
    /// wins, which is the one whose seed voxel has the lowest linear index.
    #[must_use]
    pub fn largest(&self) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for (i, &size) in self.sizes.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let label = (i + 1) as u32;
            match best {
                Some((_, best_size)) if size <= best_size => {}
                _ => best = Some((label, size)),
            }
        }
        best.map(|(label, _)| label)
    }
}

/// Label the 6-connected components of a mask.
///
/// # Example
///
/// ```
/// use volume_types::VoxelMask;
/// use volume_mask::find_components;
///
/// let mut mask = VoxelMask::new((4, 1, 1));
/// mask.set(0, 0, 0, true);
/// mask.set(1, 0, 0, true);
/// mask.set(3, 0, 0, true);
///
/// let components = find_components(&mask);
/// assert_eq!(components.count(), 2);
/// assert_eq!(components.sizes, vec![2, 1]);
/// ```
#[must_use]
pub fn find_components(mask: &VoxelMask) -> ComponentLabels {
    let (nx, ny, nz) = mask.dims();
    let values = mask.values();
    let mut labels = vec![0u32; values.len()];
    let mut sizes = Vec::new();

    let mut stack: Vec<usize> = Vec::new();
    let mut next_label = 0u32;

    for seed in 0..values.len() {
        if !values[seed] || labels[seed] != 0 {
            continue;
        }

        next_label += 1;
        let mut size = 0usize;
        labels[seed] = next_label;
        stack.push(seed);

        while let Some(idx) = stack.pop() {
            size += 1;

            let x = idx % nx;
            let y = (idx / nx) % ny;
            let z = idx / (nx * ny);

            // Face neighbors only (6-connectivity).
            let mut visit = |nidx: usize| {
                if values[nidx] && labels[nidx] == 0 {
                    labels[nidx] = next_label;
                    stack.push(nidx);
                }
            };

            if x > 0 {
                visit(idx - 1);
            }
            if x + 1 < nx {
                visit(idx + 1);
            }
            if y > 0 {
                visit(idx - nx);
            }
            if y + 1 < ny {
                visit(idx + nx);
            }
            if z > 0 {
                visit(idx - nx * ny);
            }
            if z + 1 < nz {
                visit(idx + nx * ny);
            }
        }

        sizes.push(size);
    }

    ComponentLabels { labels, sizes }
}

/// Keep only the largest 6-connected component of a mask.
///
/// All smaller components are zeroed. An all-false mask is returned
/// unchanged (there is no component to select). When several components
/// share the maximum size, the one whose seed voxel comes first in scan
/// order is kept, making the result deterministic.
///
/// # Example
///
/// ```
/// use volume_types::VoxelMask;
/// use volume_mask::keep_largest_component;
///
/// let mut mask = VoxelMask::new((5, 1, 1));
/// mask.set(0, 0, 0, true);
/// mask.set(1, 0, 0, true);
/// mask.set(4, 0, 0, true); // small island
///
/// let filtered = keep_largest_component(&mask);
/// assert_eq!(filtered.count_true(), 2);
/// assert_eq!(filtered.get(4, 0, 0), Some(false));
/// ```
#[must_use]
pub fn keep_largest_component(mask: &VoxelMask) -> VoxelMask {
    let components = find_components(mask);
    let Some(keep) = components.largest() else {
        return mask.clone();
    };

    if components.count() == 1 {
        // Single component; nothing to strip.
        return mask.clone();
    }

    tracing::debug!(
        components = components.count(),
        kept_size = components.sizes[(keep - 1) as usize],
        "kept largest connected component"
    );

    let data = components.labels.iter().map(|&l| l == keep).collect();
    VoxelMask::from_vec(mask.dims(), data).unwrap_or_else(|| mask.clone())
}
