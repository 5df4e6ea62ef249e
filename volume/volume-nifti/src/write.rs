//! Minimal NIfTI-1 label-map writer.
//!
//! Writes a single-file (`n+1`) NIfTI-1 image with INT16 samples, enough
//! for synthetic fixtures and round-trip tests. Compression is chosen by
//! file extension: paths ending in `.nii.gz` are gzip compressed.

use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use volume_types::LabelVolume;

use crate::error::{NiftiIoError, NiftiIoResult};

const HEADER_LEN: usize = 348;
const INT16: i16 = 4;

/// Serialize a label volume as uncompressed NIfTI-1 bytes.
fn encode(volume: &LabelVolume) -> NiftiIoResult<Vec<u8>> {
    let (nx, ny, nz) = volume.dims();
    let spacing = volume.spacing();

    let mut header = [0u8; HEADER_LEN];

    // sizeof_hdr
    header[0..4].copy_from_slice(&348i32.to_le_bytes());

    // dim[0..8]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let dim: [i16; 8] = [3, nx as i16, ny as i16, nz as i16, 1, 1, 1, 1];
    for (i, &d) in dim.iter().enumerate() {
        let offset = 40 + i * 2;
        header[offset..offset + 2].copy_from_slice(&d.to_le_bytes());
    }

    // datatype / bitpix
    header[70..72].copy_from_slice(&INT16.to_le_bytes());
    header[72..74].copy_from_slice(&16i16.to_le_bytes());

    // pixdim[0..8]
    #[allow(clippy::cast_possible_truncation)]
    let pixdim: [f32; 8] = [
        1.0,
        spacing.x as f32,
        spacing.y as f32,
        spacing.z as f32,
        1.0,
        1.0,
        1.0,
        1.0,
    ];
    for (i, &p) in pixdim.iter().enumerate() {
        let offset = 76 + i * 4;
        header[offset..offset + 4].copy_from_slice(&p.to_le_bytes());
    }

    // vox_offset = 352 (header + 4-byte extension flag)
    header[108..112].copy_from_slice(&352.0f32.to_le_bytes());

    // scl_slope = 1.0, scl_inter = 0.0
    header[112..116].copy_from_slice(&1.0f32.to_le_bytes());
    header[116..120].copy_from_slice(&0.0f32.to_le_bytes());

    // magic = "n+1\0" (single-file NIfTI-1)
    header[344..348].copy_from_slice(b"n+1\0");

    let mut buffer = Vec::with_capacity(352 + volume.len() * 2);
    buffer.extend_from_slice(&header);
    buffer.extend_from_slice(&[0u8; 4]); // no extensions

    for &label in volume.values() {
        let sample =
            i16::try_from(label).map_err(|_| NiftiIoError::LabelRange { label })?;
        buffer.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(buffer)
}

/// Write a label volume to a `.nii` or `.nii.gz` file.
///
/// Samples are stored as INT16, which covers every FreeSurfer/SynthSeg
/// label code. The parent directory must already exist.
///
/// # Errors
///
/// - [`NiftiIoError::LabelRange`] if any label does not fit INT16
/// - [`NiftiIoError::Write`] if the file cannot be written
///
/// # Example
///
/// ```no_run
/// use volume_types::{LabelVolume, VoxelSpacing};
/// use volume_nifti::save_label_volume;
///
/// let mut volume = LabelVolume::new((4, 4, 4), VoxelSpacing::isotropic(1.0));
/// volume.set(1, 1, 1, 3);
/// save_label_volume("fixture.nii.gz", &volume).unwrap();
/// ```
pub fn save_label_volume<P: AsRef<Path>>(path: P, volume: &LabelVolume) -> NiftiIoResult<()> {
    let path = path.as_ref();
    let raw = encode(volume)?;

    let bytes = if path
        .to_string_lossy()
        .to_lowercase()
        .ends_with(".nii.gz")
    {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&raw)
            .and_then(|()| encoder.finish())
            .map_err(|source| NiftiIoError::Write {
                path: path.to_path_buf(),
                source,
            })?
    } else {
        raw
    };

    std::fs::write(path, bytes).map_err(|source| NiftiIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::load_label_volume;
    use approx::assert_relative_eq;
    use volume_types::VoxelSpacing;

    fn fixture_volume() -> LabelVolume {
        let mut v = LabelVolume::new((4, 3, 2), VoxelSpacing::new(1.0, 2.0, 3.0));
        v.set(1, 1, 1, 3);
        v.set(2, 1, 0, 41);
        v.set(3, 2, 1, 42);
        v
    }

    #[test]
    fn encode_layout() {
        let bytes = encode(&fixture_volume());
        let Ok(bytes) = bytes else {
            panic!("encode failed");
        };
        assert_eq!(bytes.len(), 352 + 24 * 2);
        assert_eq!(&bytes[344..348], b"n+1\0");
        let sizeof_hdr = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(sizeof_hdr, 348);
    }

    #[test]
    fn roundtrip_nii() {
        let dir = tempfile::tempdir();
        let Ok(dir) = dir else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("labels.nii");
        let original = fixture_volume();

        assert!(save_label_volume(&path, &original).is_ok());
        let loaded = load_label_volume(&path);
        let Ok(loaded) = loaded else {
            panic!("load failed");
        };

        assert_eq!(loaded.dims(), original.dims());
        assert_eq!(loaded.values(), original.values());
        assert_relative_eq!(loaded.spacing().x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(loaded.spacing().y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(loaded.spacing().z, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn roundtrip_nii_gz() {
        let dir = tempfile::tempdir();
        let Ok(dir) = dir else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("labels.nii.gz");
        let original = fixture_volume();

        assert!(save_label_volume(&path, &original).is_ok());
        let loaded = load_label_volume(&path);
        let Ok(loaded) = loaded else {
            panic!("load failed");
        };
        assert_eq!(loaded.values(), original.values());
    }

    #[test]
    fn out_of_range_label_is_rejected() {
        let mut v = LabelVolume::new((2, 2, 2), VoxelSpacing::isotropic(1.0));
        v.set(0, 0, 0, 1_000_000);
        let result = encode(&v);
        assert!(matches!(
            result,
            Err(NiftiIoError::LabelRange { label: 1_000_000 })
        ));
    }
}
