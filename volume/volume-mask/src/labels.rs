//! Mask construction from label sets.

use volume_types::{LabelVolume, VoxelMask};

/// Build a boolean mask marking voxels whose label is in `labels`.
///
/// Membership is exact integer equality; label codes are never rescaled or
/// interpolated. An empty result (no matching voxels) is valid and flows
/// through the rest of the pipeline until surface extraction rejects it.
///
/// The operation is idempotent in the sense that re-deriving a mask from
/// the same volume and label set always yields the same mask.
///
/// # Example
///
/// ```
/// use volume_types::{LabelVolume, VoxelSpacing};
/// use volume_mask::mask_from_labels;
///
/// let mut volume = LabelVolume::new((2, 2, 2), VoxelSpacing::isotropic(1.0));
/// volume.set(0, 0, 0, 2);
/// volume.set(1, 1, 1, 3);
/// volume.set(1, 0, 0, 41);
///
/// let left = mask_from_labels(&volume, &[2, 3]);
/// assert_eq!(left.count_true(), 2);
///
/// let none = mask_from_labels(&volume, &[99]);
/// assert!(!none.any());
/// ```
#[must_use]
pub fn mask_from_labels(volume: &LabelVolume, labels: &[i32]) -> VoxelMask {
    let data = volume
        .values()
        .iter()
        .map(|v| labels.contains(v))
        .collect();

    // Length is volume.len() by construction.
    VoxelMask::from_vec(volume.dims(), data).unwrap_or_else(|| VoxelMask::new(volume.dims()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use volume_types::VoxelSpacing;

    fn volume_with(labels: &[(usize, usize, usize, i32)]) -> LabelVolume {
        let mut v = LabelVolume::new((3, 3, 3), VoxelSpacing::isotropic(1.0));
        for &(x, y, z, l) in labels {
            v.set(x, y, z, l);
        }
        v
    }

    #[test]
    fn selects_exact_labels_only() {
        let v = volume_with(&[(0, 0, 0, 2), (1, 1, 1, 3), (2, 2, 2, 41)]);
        let m = mask_from_labels(&v, &[2, 3]);
        assert_eq!(m.get(0, 0, 0), Some(true));
        assert_eq!(m.get(1, 1, 1), Some(true));
        assert_eq!(m.get(2, 2, 2), Some(false));
        assert_eq!(m.count_true(), 2);
    }

    #[test]
    fn empty_label_set_selects_nothing() {
        let v = volume_with(&[(0, 0, 0, 2)]);
        let m = mask_from_labels(&v, &[]);
        assert!(!m.any());
    }

    #[test]
    fn no_matching_voxels_is_valid() {
        let v = volume_with(&[(0, 0, 0, 2)]);
        let m = mask_from_labels(&v, &[41, 42]);
        assert_eq!(m.count_true(), 0);
        assert_eq!(m.dims(), v.dims());
    }

    #[test]
    fn idempotent_for_same_inputs() {
        let v = volume_with(&[(0, 1, 2, 3), (2, 1, 0, 2), (1, 1, 1, 7)]);
        let a = mask_from_labels(&v, &[2, 3]);
        let b = mask_from_labels(&v, &[2, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn label_order_does_not_matter() {
        let v = volume_with(&[(0, 0, 0, 2), (1, 0, 0, 3)]);
        assert_eq!(mask_from_labels(&v, &[2, 3]), mask_from_labels(&v, &[3, 2]));
    }
}
