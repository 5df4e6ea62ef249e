//! 3D integer label volume.

use crate::VoxelSpacing;

/// A 3D grid of integer anatomical label codes with physical voxel spacing.
///
/// Values are stored in a flat buffer with x varying fastest
/// (`index = x + y*nx + z*nx*ny`), the NIfTI convention. A loaded volume is
/// treated as immutable by the pipeline; mutation is only used when
/// constructing synthetic volumes.
///
/// # Example
///
/// ```
/// use volume_types::{LabelVolume, VoxelSpacing};
///
/// let mut volume = LabelVolume::new((3, 3, 3), VoxelSpacing::isotropic(1.0));
/// volume.set(2, 1, 0, 41);
/// assert_eq!(volume.get(2, 1, 0), Some(41));
/// assert_eq!(volume.get(3, 0, 0), None);
/// ```
#[derive(Debug, Clone)]
pub struct LabelVolume {
    data: Vec<i32>,
    dims: (usize, usize, usize),
    spacing: VoxelSpacing,
}

impl LabelVolume {
    /// Create a zero-filled volume with the given dimensions and spacing.
    #[must_use]
    pub fn new(dims: (usize, usize, usize), spacing: VoxelSpacing) -> Self {
        let (nx, ny, nz) = dims;
        Self {
            data: vec![0; nx * ny * nz],
            dims,
            spacing,
        }
    }

    /// Create a volume from an existing x-fastest buffer.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    #[must_use]
    pub fn from_vec(
        dims: (usize, usize, usize),
        spacing: VoxelSpacing,
        data: Vec<i32>,
    ) -> Option<Self> {
        let (nx, ny, nz) = dims;
        if data.len() != nx * ny * nz {
            return None;
        }
        Some(Self {
            data,
            dims,
            spacing,
        })
    }

    /// Grid dimensions `(nx, ny, nz)`.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Physical voxel spacing.
    #[inline]
    #[must_use]
    pub const fn spacing(&self) -> VoxelSpacing {
        self.spacing
    }

    /// Total number of voxels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the volume contains no voxels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat buffer index for voxel `(x, y, z)`.
    #[inline]
    #[must_use]
    pub const fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dims.0 + z * self.dims.0 * self.dims.1
    }

    /// Label at `(x, y, z)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<i32> {
        let (nx, ny, nz) = self.dims;
        if x >= nx || y >= ny || z >= nz {
            return None;
        }
        Some(self.data[self.linear_index(x, y, z)])
    }

    /// Set the label at `(x, y, z)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, label: i32) {
        let (nx, ny, nz) = self.dims;
        if x < nx && y < ny && z < nz {
            let idx = self.linear_index(x, y, z);
            self.data[idx] = label;
        }
    }

    /// The raw x-fastest label buffer.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.data
    }
}
