//! Label-map loading.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use flate2::read::GzDecoder;
use ndarray::{Array, IxDyn};
use nifti::volume::ndarray::IntoNdArray;
use nifti::{InMemNiftiObject, NiftiObject};
use tracing::{debug, warn};
use volume_types::{LabelVolume, VoxelSpacing};

use crate::error::{NiftiIoError, NiftiIoResult};

/// Check if bytes are gzip compressed.
fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

/// Load a NIfTI-1 label map as a [`LabelVolume`].
///
/// Supports `.nii` and `.nii.gz` (gzip is auto-detected from the stream).
/// Label values are preserved exactly: the decoded samples are rounded to
/// the nearest integer, which is the identity for any integer-typed label
/// map. Trailing singleton dimensions (e.g. a `(nx, ny, nz, 1)` file) are
/// squeezed; genuinely higher-dimensional images are rejected.
///
/// Voxel spacing comes from the header `pixdim` fields. Non-positive
/// spacing components (seen in the wild for synthetic files) are replaced
/// with 1.0 mm.
///
/// # Errors
///
/// - [`NiftiIoError::Read`] if the file cannot be read
/// - [`NiftiIoError::Format`] if the stream is not valid NIfTI-1
/// - [`NiftiIoError::NotVolumetric`] if the image is not 3D
pub fn load_label_volume<P: AsRef<Path>>(path: P) -> NiftiIoResult<LabelVolume> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| NiftiIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let obj: InMemNiftiObject = if is_gzip(&bytes) {
        InMemNiftiObject::from_reader(GzDecoder::new(Cursor::new(bytes.as_slice())))?
    } else {
        InMemNiftiObject::from_reader(Cursor::new(bytes.as_slice()))?
    };

    let header = obj.header();
    let ndim = header.dim[0] as usize;
    if ndim < 3 {
        return Err(NiftiIoError::NotVolumetric { ndim });
    }
    // Dimensions beyond the third must be singleton to qualify as a volume.
    for d in 4..=ndim.min(7) {
        if header.dim[d] > 1 {
            return Err(NiftiIoError::NotVolumetric { ndim });
        }
    }

    let nx = header.dim[1] as usize;
    let ny = header.dim[2] as usize;
    let nz = header.dim[3] as usize;

    let mut spacing = VoxelSpacing::new(
        f64::from(header.pixdim[1]),
        f64::from(header.pixdim[2]),
        f64::from(header.pixdim[3]),
    );
    if !spacing.is_valid() {
        warn!(?spacing, "non-positive voxel spacing in header, using 1 mm");
        spacing = VoxelSpacing::new(
            positive_or_unit(spacing.x),
            positive_or_unit(spacing.y),
            positive_or_unit(spacing.z),
        );
    }

    let array: Array<f64, _> = obj.into_volume().into_ndarray()?;
    if array.ndim() < 3 {
        return Err(NiftiIoError::NotVolumetric { ndim: array.ndim() });
    }

    // Walk the logical grid in x-fastest order to fill the flat buffer;
    // trailing singleton axes are indexed at 0.
    let mut data = Vec::with_capacity(nx * ny * nz);
    let mut idx = vec![0usize; array.ndim()];
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                idx[0] = x;
                idx[1] = y;
                idx[2] = z;
                let value = array.get(IxDyn(&idx)).copied().unwrap_or(0.0);
                #[allow(clippy::cast_possible_truncation)]
                data.push(value.round() as i32);
            }
        }
    }

    debug!(path = %path.display(), nx, ny, nz, "loaded label map");

    LabelVolume::from_vec((nx, ny, nz), spacing, data)
        .ok_or(NiftiIoError::NotVolumetric { ndim })
}

fn positive_or_unit(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gzip_magic_detection() {
        assert!(is_gzip(&[0x1f, 0x8b, 0x08]));
        assert!(!is_gzip(&[0x1f]));
        assert!(!is_gzip(b"solid"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_label_volume("/nonexistent/labels_12345.nii");
        assert!(matches!(result, Err(NiftiIoError::Read { .. })));
    }

    #[test]
    fn garbage_bytes_are_a_format_error() {
        let dir = tempfile::tempdir();
        let Ok(dir) = dir else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("junk.nii");
        if fs::write(&path, b"definitely not a nifti header").is_ok() {
            let result = load_label_volume(&path);
            assert!(matches!(result, Err(NiftiIoError::Format(_))));
        }
    }
}
