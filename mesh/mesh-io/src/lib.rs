//! Mesh file I/O.
//!
//! This crate writes (and reads back) triangle meshes in STL, the export
//! format of the segmentation-to-surface pipeline:
//!
//! - **STL** (Stereolithography) - Binary and ASCII
//!
//! # Format Detection
//!
//! [`save_mesh`] dispatches on the file extension:
//!
//! ```no_run
//! use mesh_types::unit_cube;
//! use mesh_io::save_mesh;
//!
//! let mesh = unit_cube();
//! save_mesh(&mesh, "cube.stl").unwrap();       // binary STL
//! assert!(save_mesh(&mesh, "cube.obj").is_err()); // unsupported
//! ```
//!
//! Loading auto-detects binary versus ASCII STL from the file content.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{load_stl, save_stl};

use std::path::Path;

use mesh_types::IndexedMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format, binary or ASCII.
    Stl,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            _ => None,
        }
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
        }
    }
}

/// Save a mesh to a file, detecting format from the extension.
///
/// STL files are written binary.
///
/// # Errors
///
/// Returns [`IoError::UnknownFormat`] for unrecognized extensions, or an
/// I/O error if the file cannot be written.
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        MeshFormat::Stl => save_stl(mesh, path, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path_stl() {
        assert_eq!(MeshFormat::from_path("model.stl"), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path("model.STL"), Some(MeshFormat::Stl));
        assert_eq!(
            MeshFormat::from_path("/path/to/brain_left.stl"),
            Some(MeshFormat::Stl)
        );
    }

    #[test]
    fn format_from_path_unknown() {
        assert_eq!(MeshFormat::from_path("model.obj"), None);
        assert_eq!(MeshFormat::from_path("model"), None);
        assert_eq!(MeshFormat::from_path(""), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(MeshFormat::Stl.extension(), "stl");
    }

    #[test]
    fn save_mesh_rejects_unknown_extension() {
        let mesh = mesh_types::unit_cube();
        let result = save_mesh(&mesh, "/tmp/mesh_io_test.xyz");
        assert!(matches!(result, Err(IoError::UnknownFormat { extension }) if extension == "xyz"));
    }
}
