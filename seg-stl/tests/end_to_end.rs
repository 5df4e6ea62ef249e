//! End-to-end pipeline tests over synthetic label maps.

use mesh_extract::ExtractError;
use mesh_io::load_stl;
use seg_stl::{convert_hemisphere, hemisphere_output_paths, PipelineError, PipelineOptions};
use volume_nifti::{load_label_volume, save_label_volume};
use volume_types::{LabelVolume, VoxelSpacing};

/// (4,4,4) volume with a single interior voxel labeled 3.
fn single_voxel_volume() -> LabelVolume {
    let mut volume = LabelVolume::new((4, 4, 4), VoxelSpacing::isotropic(1.0));
    volume.set(1, 1, 1, 3);
    volume
}

/// Volume carrying both hemisphere label sets as small interior blobs.
fn two_hemisphere_volume() -> LabelVolume {
    let mut volume = LabelVolume::new((10, 8, 8), VoxelSpacing::isotropic(1.0));
    for z in 2..5 {
        for y in 2..5 {
            for x in 1..4 {
                volume.set(x, y, z, if x < 3 { 2 } else { 3 });
            }
        }
    }
    for z in 2..5 {
        for y in 2..5 {
            for x in 6..9 {
                volume.set(x, y, z, if x < 8 { 41 } else { 42 });
            }
        }
    }
    volume
}

fn raw_options() -> PipelineOptions {
    PipelineOptions {
        downsample: 1,
        keep_largest: true,
        smooth_iterations: 0,
        scale: 1.0,
    }
}

#[test]
fn interior_voxel_yields_closed_surface() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("left.stl");

    let report =
        convert_hemisphere(&single_voxel_volume(), &[3], &raw_options(), &out).unwrap();
    assert!(report.vertices > 0);
    assert!(report.faces > 0);
    assert!(!report.smoothing_applied);

    let mesh = load_stl(&out).unwrap();
    assert!(!mesh.is_empty());
    // Closed octahedral surface around one 1 mm voxel.
    assert!((mesh.signed_volume() - 1.0 / 6.0).abs() < 1e-9);
}

#[test]
fn empty_label_set_fails_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("right.stl");

    // Labels 41/42 are absent from the fixture: empty mask, no surface.
    let result = convert_hemisphere(&single_voxel_volume(), &[41, 42], &raw_options(), &out);
    assert!(matches!(
        result,
        Err(PipelineError::Extract(ExtractError::NoSurface { true_count: 0, .. }))
    ));
    assert!(!out.exists(), "failed hemisphere must not leave output");
}

#[test]
fn left_output_survives_right_failure() {
    // No per-hemisphere isolation: a successful left write stays on disk
    // when the right hemisphere fails afterwards.
    let dir = tempfile::tempdir().unwrap();
    let volume = single_voxel_volume();
    let (out_left, out_right) = hemisphere_output_paths(dir.path().join("seg.nii"));

    convert_hemisphere(&volume, &[3], &raw_options(), &out_left).unwrap();
    let right = convert_hemisphere(&volume, &[41, 42], &raw_options(), &out_right);

    assert!(right.is_err());
    assert!(out_left.exists());
    assert!(!out_right.exists());
}

#[test]
fn default_options_write_both_hemispheres() {
    let dir = tempfile::tempdir().unwrap();
    let nii = dir.path().join("subject.nii");
    save_label_volume(&nii, &two_hemisphere_volume()).unwrap();

    let volume = load_label_volume(&nii).unwrap();
    let options = PipelineOptions::default();
    let (out_left, out_right) = hemisphere_output_paths(&nii);

    let left = convert_hemisphere(&volume, &[2, 3], &options, &out_left).unwrap();
    let right = convert_hemisphere(&volume, &[41, 42], &options, &out_right).unwrap();

    assert_eq!(out_left, dir.path().join("subject_left.stl"));
    assert_eq!(out_right, dir.path().join("subject_right.stl"));
    assert!(out_left.exists());
    assert!(out_right.exists());
    assert!(left.smoothing_applied);
    assert!(right.smoothing_applied);

    // Default scale 0.125: a 3-voxel blob comes out well under 1 mm.
    let mesh = load_stl(&out_left).unwrap();
    let extent = mesh.bounds().extent();
    assert!(extent.x < 1.0 && extent.y < 1.0 && extent.z < 1.0);
    assert!(extent.x > 0.0);
}

#[test]
fn scale_factor_scales_every_vertex() {
    let dir = tempfile::tempdir().unwrap();
    let volume = single_voxel_volume();

    let unscaled_path = dir.path().join("unscaled.stl");
    convert_hemisphere(&volume, &[3], &raw_options(), &unscaled_path).unwrap();

    let scaled_path = dir.path().join("scaled.stl");
    let options = PipelineOptions {
        scale: 0.5,
        ..raw_options()
    };
    convert_hemisphere(&volume, &[3], &options, &scaled_path).unwrap();

    let unscaled = load_stl(&unscaled_path).unwrap();
    let scaled = load_stl(&scaled_path).unwrap();

    assert_eq!(unscaled.face_count(), scaled.face_count());
    for (a, b) in unscaled.vertices.iter().zip(scaled.vertices.iter()) {
        assert!((a.x * 0.5 - b.x).abs() < 1e-6);
        assert!((a.y * 0.5 - b.y).abs() < 1e-6);
        assert!((a.z * 0.5 - b.z).abs() < 1e-6);
    }
}

#[test]
fn downsample_pairs_spacing_with_stride() {
    // A 2-wide blob downsampled by 2 collapses to single voxels, but the
    // doubled spacing keeps the geometry in physical units.
    let mut volume = LabelVolume::new((8, 8, 8), VoxelSpacing::isotropic(1.0));
    for z in 1..4 {
        for y in 1..4 {
            for x in 1..4 {
                volume.set(x, y, z, 3);
            }
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("coarse.stl");
    let options = PipelineOptions {
        downsample: 2,
        ..raw_options()
    };
    convert_hemisphere(&volume, &[3], &options, &out).unwrap();

    let mesh = load_stl(&out).unwrap();
    // The coarse grid still spans millimeters, not voxel indices.
    assert!(mesh.bounds().extent().x >= 2.0);
}

#[test]
fn nii_gz_roundtrip_through_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let nii = dir.path().join("subject.nii.gz");
    save_label_volume(&nii, &single_voxel_volume()).unwrap();

    let volume = load_label_volume(&nii).unwrap();
    let (out_left, _) = hemisphere_output_paths(&nii);
    assert_eq!(out_left, dir.path().join("subject_left.stl"));

    convert_hemisphere(&volume, &[3], &raw_options(), &out_left).unwrap();
    assert!(out_left.exists());
}
