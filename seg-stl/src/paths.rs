//! Output-path derivation from the input volume path.

use std::path::{Path, PathBuf};

/// Base name of a NIfTI path without its `.nii`/`.nii.gz` suffix.
///
/// The compound `.nii.gz` extension is stripped as a unit, matching how
/// neuroimaging tools name derived files; matching is case-insensitive.
/// Paths with neither suffix fall back to the plain file stem.
///
/// # Example
///
/// ```
/// use seg_stl::nifti_base_name;
///
/// assert_eq!(nifti_base_name("scans/subject01.nii.gz"), "subject01");
/// assert_eq!(nifti_base_name("seg.NII"), "seg");
/// assert_eq!(nifti_base_name("volume.mgz"), "volume");
/// ```
#[must_use]
pub fn nifti_base_name<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = name.to_lowercase();

    if lower.ends_with(".nii.gz") {
        name[..name.len() - 7].to_string()
    } else if lower.ends_with(".nii") {
        name[..name.len() - 4].to_string()
    } else {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(name)
    }
}

/// Derive the left/right STL output paths next to the input volume.
///
/// For `dir/seg.nii.gz` this returns `dir/seg_left.stl` and
/// `dir/seg_right.stl`.
#[must_use]
pub fn hemisphere_output_paths<P: AsRef<Path>>(input: P) -> (PathBuf, PathBuf) {
    let input = input.as_ref();
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let base = nifti_base_name(input);

    (
        dir.join(format!("{base}_left.stl")),
        dir.join(format!("{base}_right.stl")),
    )
}
